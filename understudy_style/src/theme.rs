// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Themes: a base style plus overlays.
//!
//! A [`Theme`] only records *which* styles make it up. The styles themselves
//! are loaded when a resolution starts, using the qualifiers current at that
//! moment, into a [`LoadedTheme`] that answers lookups.

use smallvec::SmallVec;
use understudy_resources::{AttrValue, Qualifiers, ResName, ResourceId, ResourceLoader, Style};

use crate::error::ResolveError;
use crate::overlay::OverlaySet;

/// One overlay of a [`Theme`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ThemeLayer {
    /// The overlay style.
    pub style: ResourceId,
    /// Whether the overlay overrides values already present.
    pub force: bool,
}

/// A theme: an optional base style and an append-only list of overlays.
///
/// # Example
///
/// ```rust
/// use understudy_resources::ResourceId;
/// use understudy_style::Theme;
///
/// let base = ResourceId::new(0x7f02_0000);
/// let overlay = ResourceId::new(0x7f02_0001);
///
/// let mut theme = Theme::new();
/// theme.apply_style(base, false);
/// theme.apply_style(overlay, true);
///
/// assert_eq!(theme.base(), Some(base));
/// assert_eq!(theme.overlays().len(), 1);
///
/// let mut copy = Theme::new();
/// copy.set_to(&theme);
/// assert_eq!(copy, theme);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Theme {
    base: Option<ResourceId>,
    overlays: SmallVec<[ThemeLayer; 4]>,
}

impl Theme {
    /// Creates an empty theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a style to this theme.
    ///
    /// The first style applied becomes the base and `force` is ignored for
    /// it. Every later style is appended as an overlay.
    pub fn apply_style(&mut self, style: ResourceId, force: bool) {
        if self.base.is_none() {
            self.base = Some(style);
        } else {
            self.overlays.push(ThemeLayer { style, force });
        }
    }

    /// Replaces the whole state of this theme with that of `other`.
    pub fn set_to(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Returns the base style, if any style was applied.
    #[must_use]
    #[inline]
    pub fn base(&self) -> Option<ResourceId> {
        self.base
    }

    /// Returns the overlays in application order.
    #[must_use]
    #[inline]
    pub fn overlays(&self) -> &[ThemeLayer] {
        &self.overlays
    }

    /// Returns `true` if no style was applied.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_none()
    }

    /// Loads the styles of this theme for `qualifiers`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ResourceNotFound`] if a style id is unknown to the
    /// loader, and [`ResolveError::StyleNotFound`] if a style has no variant
    /// for `qualifiers`.
    pub fn load<L: ResourceLoader + ?Sized>(
        &self,
        loader: &L,
        qualifiers: &Qualifiers,
    ) -> Result<LoadedTheme, ResolveError> {
        let base = self
            .base
            .map(|id| load_style(loader, id, qualifiers))
            .transpose()?;
        let mut overlays = OverlaySet::new();
        for layer in &self.overlays {
            overlays.push(load_style(loader, layer.style, qualifiers)?, layer.force);
        }
        Ok(LoadedTheme { base, overlays })
    }
}

fn load_style<L: ResourceLoader + ?Sized>(
    loader: &L,
    id: ResourceId,
    qualifiers: &Qualifiers,
) -> Result<Style, ResolveError> {
    let name = loader
        .resource_name(id)
        .ok_or(ResolveError::ResourceNotFound(id))?;
    loader
        .load_style(name, qualifiers)
        .ok_or_else(|| ResolveError::StyleNotFound(name.clone()))
}

/// A theme whose styles have been loaded for one set of qualifiers.
#[derive(Clone, Debug, Default)]
pub struct LoadedTheme {
    base: Option<Style>,
    overlays: OverlaySet,
}

impl LoadedTheme {
    /// Creates a loaded theme from already loaded styles.
    #[must_use]
    pub fn from_parts(base: Option<Style>, overlays: OverlaySet) -> Self {
        Self { base, overlays }
    }

    /// Returns the base style.
    #[must_use]
    pub fn base(&self) -> Option<&Style> {
        self.base.as_ref()
    }

    /// Returns the overlays.
    #[must_use]
    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    /// Looks up `attr` in the base style, then layers the overlays on top.
    #[must_use]
    pub fn lookup(&self, attr: &ResName) -> Option<&AttrValue> {
        let base = self.base.as_ref().and_then(|style| style.get(attr));
        self.overlays.apply(attr, base)
    }
}
