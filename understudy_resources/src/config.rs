// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration qualifiers.

use alloc::rc::Rc;
use core::fmt;

/// An opaque configuration key such as `en-rUS-land-hdpi`.
///
/// Qualifiers select which variant of a resource or style applies. The
/// resolver treats them as an opaque lookup key; only loaders look at the
/// individual `-`-separated segments. The empty string is the default
/// configuration.
///
/// Cloning is cheap (`Rc`).
///
/// # Example
///
/// ```rust
/// use understudy_resources::Qualifiers;
///
/// let q = Qualifiers::new("en-rUS-land");
/// assert_eq!(q.segments().collect::<Vec<_>>(), ["en", "rUS", "land"]);
/// assert!(q.contains("land"));
/// assert!(Qualifiers::default().is_default());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Qualifiers(Rc<str>);

impl Qualifiers {
    /// Creates qualifiers from their string form.
    #[must_use]
    pub fn new(qualifiers: &str) -> Self {
        Self(Rc::from(qualifiers))
    }

    /// Returns the string form.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the default (empty) configuration.
    #[must_use]
    #[inline]
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the non-empty segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('-').filter(|s| !s.is_empty())
    }

    /// Returns `true` if `segment` is one of the segments.
    #[must_use]
    pub fn contains(&self, segment: &str) -> bool {
        self.segments().any(|s| s == segment)
    }

    /// Returns `true` if every segment of `self` also appears in `active`.
    ///
    /// The default configuration matches everything.
    #[must_use]
    pub fn matches(&self, active: &Self) -> bool {
        self.segments().all(|s| active.contains(s))
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.segments().count()
    }
}

impl From<&str> for Qualifiers {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qualifiers({:?})", &*self.0)
    }
}

impl fmt::Display for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags::bitflags! {
    /// Configuration dimensions a value depends on.
    ///
    /// Carried through resolution unchanged; bit values match the platform's
    /// `CONFIG_*` constants.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ConfigChanges: u32 {
        /// Mobile country code.
        const MCC = 0x0001;
        /// Mobile network code.
        const MNC = 0x0002;
        /// Locale.
        const LOCALE = 0x0004;
        /// Touchscreen type.
        const TOUCHSCREEN = 0x0008;
        /// Keyboard type.
        const KEYBOARD = 0x0010;
        /// Keyboard accessibility.
        const KEYBOARD_HIDDEN = 0x0020;
        /// Navigation type.
        const NAVIGATION = 0x0040;
        /// Screen orientation.
        const ORIENTATION = 0x0080;
        /// Screen layout.
        const SCREEN_LAYOUT = 0x0100;
        /// UI mode (night mode, car dock, ...).
        const UI_MODE = 0x0200;
        /// Available screen size.
        const SCREEN_SIZE = 0x0400;
        /// Smallest screen width.
        const SMALLEST_SCREEN_SIZE = 0x0800;
        /// Screen density.
        const DENSITY = 0x1000;
        /// Layout direction.
        const LAYOUT_DIRECTION = 0x2000;
        /// Font scaling.
        const FONT_SCALE = 0x4000_0000;
    }
}
