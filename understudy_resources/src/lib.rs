// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Resources: the data model behind stand-in resource tables.
//!
//! This crate provides the leaf types that attribute resolution works on.
//! Resolution itself (themes, overlays, default styles and typed output) lives
//! in `understudy_style`.
//!
//! ## Core Concepts
//!
//! - [`ResName`] and [`ResourceId`]: the `(package, type, name)` key of every
//!   resource, and the numeric handle assigned to it.
//! - [`AttrValue`]: a literal, a resource reference, or a theme attribute
//!   reference. Nothing else.
//! - [`Style`]: an immutable, shared bag of attribute values.
//! - [`Qualifiers`]: the opaque configuration key that selects resource
//!   variants.
//! - [`ResourceIndex`] and [`ResourceLoader`]: the interface through which
//!   loaded resource tables are consumed.
//! - [`ResourceRepository`]: an in-memory loader for tests and tools.
//!
//! ## Quick Start
//!
//! ```rust
//! use understudy_resources::{
//!     AttrValue, Qualifiers, ResName, ResourceIndex, ResourceLoader, ResourceRepository,
//!     StyleBuilder,
//! };
//!
//! let mut repo = ResourceRepository::new();
//! let theme_id = repo.define_style(
//!     "",
//!     StyleBuilder::new(ResName::style("app", "Theme.App"))
//!         .set(
//!             ResName::attr("app", "colorAccent"),
//!             AttrValue::parse("@color/accent", "app"),
//!         )
//!         .build(),
//! );
//! repo.define_value(
//!     &ResName::new("app", "color", "accent"),
//!     "",
//!     AttrValue::parse("#3f51b5", "app"),
//! );
//!
//! let name = repo.resource_name(theme_id).unwrap().clone();
//! let theme = repo.load_style(&name, &Qualifiers::default()).unwrap();
//! let accent = theme.get(&ResName::attr("app", "colorAccent")).unwrap();
//! assert!(accent.is_resource_reference());
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod config;
mod id;
mod index;
mod repository;
mod style;
mod value;

pub use config::{ConfigChanges, Qualifiers};
pub use id::{ResName, ResourceId};
pub use index::{ResourceIndex, ResourceLoader};
pub use repository::{ResourceRepository, ResourceTable};
pub use style::{Style, StyleBuilder};
pub use value::{AttrValue, DimensionUnit, Literal, LiteralData};
