// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Style: theme and default-style attribute resolution.
//!
//! This crate resolves UI attributes against the resource model of
//! `understudy_resources`, following the platform precedence chain:
//!
//! **Explicit → Style attribute → Default style (attr) → Default style (res) → Theme**
//!
//! ## Core Concepts
//!
//! ### Themes and overlays
//!
//! A [`Theme`] is a base style plus an ordered list of overlays. A forced
//! overlay replaces values the theme already has; a non-forced one only fills
//! gaps. Theme styles are loaded for the qualifiers current at resolution
//! time, so changing the configuration changes what a theme yields.
//!
//! ### Resolution
//!
//! [`AttributeResolver`] takes the requested attribute ids, an optional
//! [`AttributeSet`], an optional default style attribute and default style
//! resource, and an optional theme. For each attribute, the first source with
//! a value wins. Theme attribute references (`?attr/name`) are chased through
//! the theme, at most [`ResolveOptions::max_chase_hops`] times.
//!
//! ### Typed results
//!
//! [`TypedAttributes`] packs resolved values into parallel integer arrays with
//! a string side table, dereferencing resource references to value
//! resources on the way.
//!
//! ## Example
//!
//! ```rust
//! use understudy_resources::{AttrValue, ResName, ResourceRepository, StyleBuilder};
//! use understudy_style::Resources;
//!
//! let text = ResName::attr("app", "text");
//! let button_style = ResName::attr("app", "buttonStyle");
//!
//! let mut repo = ResourceRepository::new();
//! repo.define_style(
//!     "",
//!     StyleBuilder::new(ResName::style("app", "Widget.Button"))
//!         .set(text.clone(), AttrValue::string("OK"))
//!         .build(),
//! );
//! let theme_id = repo.define_style(
//!     "",
//!     StyleBuilder::new(ResName::style("app", "Theme"))
//!         .set(button_style.clone(), AttrValue::parse("@style/Widget.Button", "app"))
//!         .build(),
//! );
//! let text_id = repo.define_attr(&text);
//! let button_style_id = repo.define_attr(&button_style);
//!
//! let resources = Resources::new(repo);
//! let mut theme = resources.new_theme();
//! theme.apply_style(theme_id, false);
//!
//! let typed = resources
//!     .obtain_styled_attributes(&theme, None, &[text_id], Some(button_style_id), None)
//!     .unwrap();
//! assert_eq!(typed.get_string(0), Some("OK"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod attribute_set;
mod error;
mod options;
mod overlay;
mod resolve;
mod resources;
mod theme;
mod typed;

pub use attribute_set::AttributeSet;
pub use error::ResolveError;
pub use options::{DEFAULT_MAX_CHASE_HOPS, ResolveOptions, ResolveOptionsBuilder};
pub use overlay::{OverlaySet, OverlayedStyle};
pub use resolve::{
    AttrSource, AttributeResolver, ReferenceChain, ResolvedAttributes, ResolvedValue,
};
pub use resources::Resources;
pub use theme::{LoadedTheme, Theme, ThemeLayer};
pub use typed::{
    STYLE_ASSET_COOKIE, STYLE_CHANGING_CONFIGURATIONS, STYLE_DATA, STYLE_DENSITY,
    STYLE_NUM_ENTRIES, STYLE_RESOURCE_ID, STYLE_TYPE, TypedAttributes, ValueType,
    complex_to_float, complex_unit, encode_dimension,
};
