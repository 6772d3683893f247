// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resource identification types.
//!
//! This module provides [`ResName`], the `(package, type, name)` triple that
//! keys every resource, attribute and style, and [`ResourceId`], the numeric
//! handle a [`ResourceIndex`](crate::ResourceIndex) assigns to it.

use alloc::string::{String, ToString};
use core::fmt;

/// A numeric resource identifier.
///
/// Identifiers follow the familiar `0xPPTTEEEE` layout: one byte of package,
/// one byte of type and two bytes of entry index. They are only stable for the
/// lifetime of one loaded index.
///
/// The raw value 0 never names a resource; APIs that accept "no resource" take
/// an `Option<ResourceId>` instead.
///
/// # Example
///
/// ```rust
/// use understudy_resources::ResourceId;
///
/// let id = ResourceId::from_parts(0x7f, 0x01, 3);
/// assert_eq!(id.get(), 0x7f01_0003);
/// assert_eq!(id.package_byte(), 0x7f);
/// assert_eq!(id.type_byte(), 0x01);
/// assert_eq!(id.entry_index(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Creates a resource ID from its raw value.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Assembles a resource ID from package, type and entry parts.
    #[must_use]
    #[inline]
    pub const fn from_parts(package: u8, ty: u8, entry: u16) -> Self {
        Self(((package as u32) << 24) | ((ty as u32) << 16) | entry as u32)
    }

    /// Returns the raw value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the package byte.
    #[must_use]
    #[inline]
    #[expect(clippy::cast_possible_truncation, reason = "masking out one field")]
    pub const fn package_byte(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Returns the type byte.
    #[must_use]
    #[inline]
    #[expect(clippy::cast_possible_truncation, reason = "masking out one field")]
    pub const fn type_byte(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Returns the entry index within its type.
    #[must_use]
    #[inline]
    #[expect(clippy::cast_possible_truncation, reason = "masking out one field")]
    pub const fn entry_index(self) -> u16 {
        self.0 as u16
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({:#010x})", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#0x{:x}", self.0)
    }
}

/// A fully qualified resource name: `(package, type, name)`.
///
/// Names are the universal key for resources, attributes and styles. Two
/// names are equal only when all three parts are equal.
///
/// # Example
///
/// ```rust
/// use understudy_resources::ResName;
///
/// let name = ResName::new("android", "attr", "textColor");
/// assert!(name.is_attr());
/// assert_eq!(name.to_string(), "android:attr/textColor");
///
/// let parsed = ResName::qualify("@style/Widget.Button", "com.example", "attr").unwrap();
/// assert_eq!(parsed, ResName::new("com.example", "style", "Widget.Button"));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResName {
    package: String,
    ty: String,
    name: String,
}

impl ResName {
    /// The resource type used for attribute definitions.
    pub const ATTR: &'static str = "attr";
    /// The resource type used for styles and themes.
    pub const STYLE: &'static str = "style";

    /// Creates a name from its three parts.
    #[must_use]
    pub fn new(package: impl Into<String>, ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ty: ty.into(),
            name: name.into(),
        }
    }

    /// Shorthand for an `attr` name.
    #[must_use]
    pub fn attr(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(package, Self::ATTR, name)
    }

    /// Shorthand for a `style` name.
    #[must_use]
    pub fn style(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(package, Self::STYLE, name)
    }

    /// Qualifies a possibly partial name.
    ///
    /// Accepts `name`, `type/name` or `package:type/name`, optionally prefixed
    /// with `@` or `?`. Missing parts are taken from `default_package` and
    /// `default_type`. Returns `None` if the entry name is empty.
    #[must_use]
    pub fn qualify(input: &str, default_package: &str, default_type: &str) -> Option<Self> {
        let input = input
            .strip_prefix('@')
            .or_else(|| input.strip_prefix('?'))
            .unwrap_or(input);

        let (package, rest) = match input.split_once(':') {
            Some((package, rest)) if !package.is_empty() => (package, rest),
            Some((_, rest)) => (default_package, rest),
            None => (default_package, input),
        };
        let (ty, name) = match rest.split_once('/') {
            Some((ty, name)) if !ty.is_empty() => (ty, name),
            Some((_, name)) => (default_type, name),
            None => (default_type, rest),
        };

        if name.is_empty() {
            return None;
        }
        Some(Self::new(package, ty, name))
    }

    /// Returns the package part.
    #[must_use]
    #[inline]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the type part (`attr`, `style`, `color`, ...).
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.ty
    }

    /// Returns the entry name part.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this names an attribute definition.
    #[must_use]
    #[inline]
    pub fn is_attr(&self) -> bool {
        self.ty == Self::ATTR
    }

    /// Returns `true` if this names a style.
    #[must_use]
    #[inline]
    pub fn is_style(&self) -> bool {
        self.ty == Self::STYLE
    }

    /// Returns a copy of this name with a different type.
    #[must_use]
    pub fn with_type(&self, ty: &str) -> Self {
        Self::new(self.package.clone(), ty, self.name.clone())
    }

    /// Returns the `package:type/name` form.
    #[must_use]
    pub fn fully_qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for ResName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResName({self})")
    }
}

impl fmt::Display for ResName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.package, self.ty, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn resource_id_parts() {
        let id = ResourceId::from_parts(0x7f, 0x02, 0x0010);
        assert_eq!(id.get(), 0x7f02_0010);
        assert_eq!(id.package_byte(), 0x7f);
        assert_eq!(id.type_byte(), 0x02);
        assert_eq!(id.entry_index(), 0x10);
        assert_eq!(ResourceId::new(0x7f02_0010), id);
    }

    #[test]
    fn resource_id_formatting() {
        let id = ResourceId::new(0x7f01_0000);
        assert_eq!(format!("{id}"), "#0x7f010000");
        assert_eq!(format!("{id:?}"), "ResourceId(0x7f010000)");
    }

    #[test]
    fn res_name_display() {
        let name = ResName::style("android", "Theme.Holo");
        assert_eq!(name.fully_qualified(), "android:style/Theme.Holo");
        assert_eq!(format!("{name:?}"), "ResName(android:style/Theme.Holo)");
    }

    #[test]
    fn qualify_bare_name_uses_defaults() {
        let name = ResName::qualify("textColor", "android", "attr").unwrap();
        assert_eq!(name, ResName::attr("android", "textColor"));
    }

    #[test]
    fn qualify_keeps_explicit_parts() {
        let name = ResName::qualify("@android:color/white", "app", "attr").unwrap();
        assert_eq!(name, ResName::new("android", "color", "white"));

        let name = ResName::qualify("?attr/buttonStyle", "app", "style").unwrap();
        assert_eq!(name, ResName::attr("app", "buttonStyle"));

        let name = ResName::qualify("?android:textColorPrimary", "app", "attr").unwrap();
        assert_eq!(name, ResName::attr("android", "textColorPrimary"));
    }

    #[test]
    fn qualify_rejects_empty_entry() {
        assert!(ResName::qualify("@style/", "app", "attr").is_none());
        assert!(ResName::qualify("", "app", "attr").is_none());
    }

    #[test]
    fn with_type_swaps_only_type() {
        let name = ResName::attr("app", "buttonStyle");
        assert_eq!(name.with_type("style"), ResName::style("app", "buttonStyle"));
    }
}
