// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay styles layered on top of a base theme.

use smallvec::SmallVec;
use understudy_resources::{AttrValue, ResName, Style};

/// A style applied on top of a theme.
///
/// A forced overlay replaces values the theme already has; a non-forced one
/// only fills gaps.
#[derive(Clone, Debug)]
pub struct OverlayedStyle {
    /// The overlay's style.
    pub style: Style,
    /// Whether the overlay overrides existing values.
    pub force: bool,
}

/// An ordered list of overlays.
///
/// Order matters: overlays are applied first to last, so of several forced
/// overlays defining the same attribute, the last one wins, and a non-forced
/// overlay never replaces a value set by the base or an earlier overlay.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, ResName, StyleBuilder};
/// use understudy_style::OverlaySet;
///
/// let color = ResName::attr("app", "textColor");
/// let soft = StyleBuilder::new(ResName::style("app", "Soft"))
///     .set(color.clone(), AttrValue::color(0xff11_1111))
///     .build();
/// let hard = StyleBuilder::new(ResName::style("app", "Hard"))
///     .set(color.clone(), AttrValue::color(0xff22_2222))
///     .build();
///
/// let mut overlays = OverlaySet::new();
/// overlays.push(soft, false);
/// overlays.push(hard, true);
///
/// let base = AttrValue::color(0xff00_0000);
/// assert_eq!(overlays.apply(&color, Some(&base)), Some(&AttrValue::color(0xff22_2222)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OverlaySet {
    layers: SmallVec<[OverlayedStyle; 4]>,
}

impl OverlaySet {
    /// Creates an empty overlay set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an overlay.
    pub fn push(&mut self, style: Style, force: bool) {
        self.layers.push(OverlayedStyle { style, force });
    }

    /// Returns the number of overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no overlays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns an iterator over the overlays, first applied first.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayedStyle> + '_ {
        self.layers.iter()
    }

    /// Layers the overlays over `base`, the value the base theme has for
    /// `attr`.
    #[must_use]
    pub fn apply<'a>(&'a self, attr: &ResName, base: Option<&'a AttrValue>) -> Option<&'a AttrValue> {
        let mut current = base;
        for layer in &self.layers {
            if let Some(value) = layer.style.get(attr)
                && (current.is_none() || layer.force)
            {
                current = Some(value);
            }
        }
        current
    }
}

impl FromIterator<OverlayedStyle> for OverlaySet {
    fn from_iter<I: IntoIterator<Item = OverlayedStyle>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understudy_resources::StyleBuilder;

    fn attr() -> ResName {
        ResName::attr("app", "textColor")
    }

    fn overlay(name: &str, value: Option<u32>) -> Style {
        let builder = StyleBuilder::new(ResName::style("app", name));
        match value {
            Some(argb) => builder.set(attr(), AttrValue::color(argb)).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn empty_set_returns_base() {
        let overlays = OverlaySet::new();
        let base = AttrValue::color(1);
        assert_eq!(overlays.apply(&attr(), Some(&base)), Some(&base));
        assert_eq!(overlays.apply(&attr(), None), None);
    }

    #[test]
    fn non_forced_fills_gap_only() {
        let mut overlays = OverlaySet::new();
        overlays.push(overlay("A", Some(2)), false);

        let base = AttrValue::color(1);
        assert_eq!(overlays.apply(&attr(), Some(&base)), Some(&base));
        assert_eq!(overlays.apply(&attr(), None), Some(&AttrValue::color(2)));
    }

    #[test]
    fn forced_overrides_base() {
        let mut overlays = OverlaySet::new();
        overlays.push(overlay("A", Some(2)), true);

        let base = AttrValue::color(1);
        assert_eq!(overlays.apply(&attr(), Some(&base)), Some(&AttrValue::color(2)));
    }

    #[test]
    fn later_forced_wins() {
        let mut overlays = OverlaySet::new();
        overlays.push(overlay("A", Some(1)), false);
        overlays.push(overlay("B", Some(2)), true);
        overlays.push(overlay("C", Some(3)), true);
        overlays.push(overlay("D", None), true);

        let base = AttrValue::color(0);
        assert_eq!(overlays.apply(&attr(), Some(&base)), Some(&AttrValue::color(3)));
    }

    #[test]
    fn non_forced_after_gap_fill_does_not_replace() {
        let mut overlays = OverlaySet::new();
        overlays.push(overlay("A", Some(1)), false);
        overlays.push(overlay("B", Some(2)), false);

        assert_eq!(overlays.apply(&attr(), None), Some(&AttrValue::color(1)));
    }

    #[test]
    fn collect_preserves_order() {
        let overlays: OverlaySet = [
            OverlayedStyle {
                style: overlay("A", Some(1)),
                force: false,
            },
            OverlayedStyle {
                style: overlay("B", Some(2)),
                force: true,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(overlays.len(), 2);
        let forces: alloc::vec::Vec<_> = overlays.iter().map(|o| o.force).collect();
        assert_eq!(forces, [false, true]);
    }
}
