// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit attribute values of one element.

use alloc::string::String;
use alloc::vec::Vec;

use understudy_resources::{AttrValue, ResName, ResourceId};

/// The attributes written directly on an element.
///
/// Besides plain `attr -> value` pairs, an attribute set can carry a `style`
/// attribute naming either a style or an attribute whose theme value names
/// one, and a position description (usually `file:line`) that shows up in
/// diagnostics.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, ResName, ResourceId};
/// use understudy_style::AttributeSet;
///
/// let text = ResName::attr("app", "text");
/// let set = AttributeSet::new()
///     .with(text.clone(), AttrValue::string("Hello"))
///     .with_style(ResourceId::new(0x7f02_0000))
///     .with_position_description("main.xml:12");
///
/// assert_eq!(set.get(&text), Some(&AttrValue::string("Hello")));
/// assert_eq!(set.style_attribute(), Some(ResourceId::new(0x7f02_0000)));
/// assert_eq!(set.position_description(), "main.xml:12");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    /// Sorted by attribute name.
    entries: Vec<(ResName, AttrValue)>,
    style: Option<ResourceId>,
    position: String,
}

impl AttributeSet {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any earlier value.
    #[must_use]
    pub fn with(mut self, attr: ResName, value: AttrValue) -> Self {
        self.set(attr, value);
        self
    }

    /// Sets an attribute in place.
    pub fn set(&mut self, attr: ResName, value: AttrValue) {
        match self.entries.binary_search_by(|(name, _)| name.cmp(&attr)) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (attr, value)),
        }
    }

    /// Sets the `style` attribute.
    #[must_use]
    pub fn with_style(mut self, style: ResourceId) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the position description.
    #[must_use]
    pub fn with_position_description(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Returns the explicit value for `attr`.
    #[must_use]
    pub fn get(&self, attr: &ResName) -> Option<&AttrValue> {
        self.entries
            .binary_search_by(|(name, _)| name.cmp(attr))
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// Returns the `style` attribute.
    #[must_use]
    #[inline]
    pub fn style_attribute(&self) -> Option<ResourceId> {
        self.style
    }

    /// Returns the position description.
    #[must_use]
    #[inline]
    pub fn position_description(&self) -> &str {
        &self.position
    }

    /// Returns the number of explicit attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over `(attribute, value)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&ResName, &AttrValue)> + '_ {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces() {
        let attr = ResName::attr("app", "a");
        let mut set = AttributeSet::new().with(attr.clone(), AttrValue::string("1"));
        set.set(attr.clone(), AttrValue::string("2"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&attr), Some(&AttrValue::string("2")));
    }

    #[test]
    fn iter_is_sorted() {
        let set = AttributeSet::new()
            .with(ResName::attr("app", "b"), AttrValue::string("b"))
            .with(ResName::attr("app", "a"), AttrValue::string("a"));
        let names: Vec<_> = set.iter().map(|(name, _)| name.name()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn empty_defaults() {
        let set = AttributeSet::new();
        assert!(set.is_empty());
        assert_eq!(set.style_attribute(), None);
        assert_eq!(set.position_description(), "");
    }
}
