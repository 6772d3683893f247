// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution options.

/// Default bound on reference hops.
pub const DEFAULT_MAX_CHASE_HOPS: usize = 32;

/// Tunables for attribute resolution.
///
/// # Example
///
/// ```rust
/// use understudy_style::ResolveOptionsBuilder;
///
/// let options = ResolveOptionsBuilder::new()
///     .max_chase_hops(8)
///     .display_density(2.0)
///     .build();
///
/// assert_eq!(options.max_chase_hops(), 8);
/// assert_eq!(options.display_density(), 2.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolveOptions {
    max_chase_hops: usize,
    display_density: f32,
}

impl ResolveOptions {
    /// Returns the maximum number of reference hops followed before a chain
    /// is treated as cyclic.
    #[must_use]
    #[inline]
    pub fn max_chase_hops(&self) -> usize {
        self.max_chase_hops
    }

    /// Returns the display density used to convert dimensions to pixels.
    #[must_use]
    #[inline]
    pub fn display_density(&self) -> f32 {
        self.display_density
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_chase_hops: DEFAULT_MAX_CHASE_HOPS,
            display_density: 1.0,
        }
    }
}

/// Builder for [`ResolveOptions`].
#[derive(Debug, Default)]
pub struct ResolveOptionsBuilder {
    options: ResolveOptions,
}

impl ResolveOptionsBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of reference hops.
    #[must_use]
    pub fn max_chase_hops(mut self, hops: usize) -> Self {
        self.options.max_chase_hops = hops;
        self
    }

    /// Sets the display density (1.0 is a 160 dpi screen).
    #[must_use]
    pub fn display_density(mut self, density: f32) -> Self {
        self.options.display_density = density;
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> ResolveOptions {
        self.options
    }
}
