// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared style definitions.
//!
//! This module provides [`Style`], one named, qualifier-resolved bag of
//! attribute values, and [`StyleBuilder`] to construct it.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::id::ResName;
use crate::value::AttrValue;

/// A shared, immutable style or theme node.
///
/// A style maps attribute names to [`AttrValue`]s and remembers the name of
/// its parent. By the time a resolver sees a style, the loader has already
/// merged the parent chain for the active qualifiers, so lookups never walk
/// parents themselves.
///
/// Styles are immutable after creation. Use [`StyleBuilder`] to construct them.
///
/// # Memory Layout
///
/// Internally, `Style` wraps an `Rc<StyleData>`, making cloning cheap. The
/// entries are stored once in a vector sorted by attribute name.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, ResName, StyleBuilder};
///
/// let text_color = ResName::attr("android", "textColor");
///
/// let style = StyleBuilder::new(ResName::style("app", "Widget.Label"))
///     .set(text_color.clone(), AttrValue::color(0xff00_0000))
///     .build();
///
/// assert_eq!(style.get(&text_color), Some(&AttrValue::color(0xff00_0000)));
/// assert!(style.get(&ResName::attr("android", "textSize")).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Style {
    inner: Rc<StyleData>,
}

#[derive(Debug)]
struct StyleData {
    name: ResName,
    parent: Option<ResName>,
    /// Sorted by attribute name for binary search lookup.
    entries: Vec<(ResName, AttrValue)>,
}

impl Style {
    /// Returns the name of this style.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &ResName {
        &self.inner.name
    }

    /// Returns the name of the parent style, if any.
    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<&ResName> {
        self.inner.parent.as_ref()
    }

    /// Returns `true` if this style defines no attributes.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the number of attributes defined.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Looks up the value for an attribute.
    #[must_use]
    pub fn get(&self, attr: &ResName) -> Option<&AttrValue> {
        self.inner
            .entries
            .binary_search_by(|(name, _)| name.cmp(attr))
            .ok()
            .map(|idx| &self.inner.entries[idx].1)
    }

    /// Returns `true` if this style defines the attribute.
    #[must_use]
    pub fn contains(&self, attr: &ResName) -> bool {
        self.get(attr).is_some()
    }

    /// Returns an iterator over `(attribute, value)` entries, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&ResName, &AttrValue)> + '_ {
        self.inner.entries.iter().map(|(name, value)| (name, value))
    }

    /// Returns `true` if both handles share the same data.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Builder for constructing [`Style`] instances.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, ResName, StyleBuilder};
///
/// let base = StyleBuilder::new(ResName::style("app", "Base"))
///     .set(ResName::attr("app", "a"), AttrValue::string("base"))
///     .set(ResName::attr("app", "b"), AttrValue::string("base"))
///     .build();
///
/// // Start from the parent's entries and override some of them.
/// let child = StyleBuilder::new(ResName::style("app", "Base.Child"))
///     .parent(base.name().clone())
///     .extend_from(&base)
///     .set(ResName::attr("app", "b"), AttrValue::string("child"))
///     .build();
///
/// assert_eq!(child.get(&ResName::attr("app", "a")), Some(&AttrValue::string("base")));
/// assert_eq!(child.get(&ResName::attr("app", "b")), Some(&AttrValue::string("child")));
/// ```
#[derive(Debug)]
pub struct StyleBuilder {
    name: ResName,
    parent: Option<ResName>,
    entries: Vec<(ResName, AttrValue)>,
}

impl StyleBuilder {
    /// Creates a new empty builder for the named style.
    #[must_use]
    pub fn new(name: ResName) -> Self {
        Self {
            name,
            parent: None,
            entries: Vec::new(),
        }
    }

    /// Sets the parent style name.
    #[must_use]
    pub fn parent(mut self, parent: ResName) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets an attribute value.
    ///
    /// If the attribute was already set, the value is replaced.
    #[must_use]
    pub fn set(mut self, attr: ResName, value: AttrValue) -> Self {
        self.insert(attr, value);
        self
    }

    /// Copies every entry of `other` into this builder, replacing existing ones.
    #[must_use]
    pub fn extend_from(mut self, other: &Style) -> Self {
        for (attr, value) in other.entries() {
            self.insert(attr.clone(), value.clone());
        }
        self
    }

    /// Sets an attribute value in place.
    pub fn insert(&mut self, attr: ResName, value: AttrValue) {
        match self.entries.binary_search_by(|(name, _)| name.cmp(&attr)) {
            Ok(idx) => {
                self.entries[idx].1 = value;
            }
            Err(idx) => {
                self.entries.insert(idx, (attr, value));
            }
        }
    }

    /// Builds the style.
    #[must_use]
    pub fn build(self) -> Style {
        Style {
            inner: Rc::new(StyleData {
                name: self.name,
                parent: self.parent,
                entries: self.entries,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str) -> ResName {
        ResName::attr("app", name)
    }

    #[test]
    fn style_empty() {
        let style = StyleBuilder::new(ResName::style("app", "Empty")).build();
        assert!(style.is_empty());
        assert_eq!(style.len(), 0);
        assert!(style.parent().is_none());
    }

    #[test]
    fn style_replace_value() {
        let style = StyleBuilder::new(ResName::style("app", "S"))
            .set(attr("a"), AttrValue::string("one"))
            .set(attr("a"), AttrValue::string("two"))
            .build();

        assert_eq!(style.len(), 1);
        assert_eq!(style.get(&attr("a")), Some(&AttrValue::string("two")));
    }

    #[test]
    fn style_entries_are_sorted() {
        let style = StyleBuilder::new(ResName::style("app", "S"))
            .set(attr("zeta"), AttrValue::string("z"))
            .set(attr("alpha"), AttrValue::string("a"))
            .set(attr("mid"), AttrValue::string("m"))
            .build();

        let names: Vec<_> = style.entries().map(|(name, _)| name.name()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
        assert!(style.contains(&attr("mid")));
        assert!(!style.contains(&attr("other")));
    }

    #[test]
    fn same_entry_name_different_package_is_distinct() {
        let ours = ResName::attr("app", "textColor");
        let theirs = ResName::attr("android", "textColor");
        let style = StyleBuilder::new(ResName::style("app", "S"))
            .set(ours.clone(), AttrValue::string("ours"))
            .build();

        assert!(style.get(&ours).is_some());
        assert!(style.get(&theirs).is_none());
    }

    #[test]
    fn style_clone_is_cheap() {
        let style = StyleBuilder::new(ResName::style("app", "S"))
            .set(attr("a"), AttrValue::string("x"))
            .build();
        let style2 = style.clone();

        assert!(style.ptr_eq(&style2));
        assert_eq!(style2.name(), &ResName::style("app", "S"));
    }
}
