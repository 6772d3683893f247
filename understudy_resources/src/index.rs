// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator interfaces for loaded resource tables.
//!
//! Resolution never parses resource files itself. Whatever loads them hands
//! the results over through these two traits. [`ResourceRepository`] is the
//! in-memory implementation shipped with this crate.
//!
//! [`ResourceRepository`]: crate::ResourceRepository

use crate::config::Qualifiers;
use crate::id::{ResName, ResourceId};
use crate::style::Style;
use crate::value::AttrValue;

/// Bidirectional mapping between resource names and identifiers.
pub trait ResourceIndex {
    /// Returns the identifier assigned to `name`.
    fn resource_id(&self, name: &ResName) -> Option<ResourceId>;

    /// Returns the name behind `id`.
    fn resource_name(&self, id: ResourceId) -> Option<&ResName>;
}

/// Qualifier-aware access to loaded styles and value resources.
///
/// Implementations must be pure with respect to their inputs: the same name
/// and qualifiers always yield the same result for one loaded table.
pub trait ResourceLoader: ResourceIndex {
    /// Returns the style named `name` for `qualifiers`, with its parent chain
    /// already merged in, or `None` if no variant is defined.
    fn load_style(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<Style>;

    /// Returns the value of a value resource (color, string, dimen, ...) for
    /// `qualifiers`.
    ///
    /// The default implementation knows no values, which makes every
    /// resource reference stay a plain reference.
    fn load_value(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<AttrValue> {
        let _ = (name, qualifiers);
        None
    }
}

impl<T: ResourceIndex + ?Sized> ResourceIndex for &T {
    fn resource_id(&self, name: &ResName) -> Option<ResourceId> {
        (**self).resource_id(name)
    }

    fn resource_name(&self, id: ResourceId) -> Option<&ResName> {
        (**self).resource_name(id)
    }
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for &T {
    fn load_style(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<Style> {
        (**self).load_style(name, qualifiers)
    }

    fn load_value(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<AttrValue> {
        (**self).load_value(name, qualifiers)
    }
}
