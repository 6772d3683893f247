// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution errors.

use understudy_resources::{ResName, ResourceId};

/// A fatal resolution failure.
///
/// Any of these aborts the whole resolution call; no partial results are
/// returned. An attribute that simply has no value anywhere is not an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A numeric id that the index does not know.
    #[error("Unable to find resource ID {0}")]
    ResourceNotFound(ResourceId),
    /// A reference to a name that the index does not know.
    #[error("Unable to find resource {0}")]
    UnknownResource(ResName),
    /// A style with no variant for the current qualifiers.
    #[error("no style {0} for the current configuration")]
    StyleNotFound(ResName),
    /// A theme attribute reference needed a theme, but there was none.
    #[error("no theme, but trying to look up {reference} for {attr}")]
    ThemeRequired {
        /// The attribute being resolved.
        attr: ResName,
        /// The theme attribute it refers to.
        reference: ResName,
    },
    /// A reference chain did not terminate within the hop bound.
    #[error("reference chain for {attr} exceeds {hops} hops")]
    CyclicReference {
        /// The attribute or resource whose chain was followed.
        attr: ResName,
        /// The hop bound that was exceeded.
        hops: usize,
    },
    /// A reference that has to name a style led nowhere.
    #[error("couldn't dereference {attr}")]
    UnresolvedReference {
        /// The attribute that could not be followed.
        attr: ResName,
    },
}
