// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory resource tables.
//!
//! [`ResourceTable`] assigns identifiers to names. [`ResourceRepository`]
//! adds qualifier variants of styles and value resources on top of a table
//! and implements [`ResourceLoader`], so tests and tools can drive resolution
//! without any resource files.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::config::Qualifiers;
use crate::id::{ResName, ResourceId};
use crate::index::{ResourceIndex, ResourceLoader};
use crate::style::{Style, StyleBuilder};
use crate::value::AttrValue;

/// Package byte used for the platform package.
const PLATFORM_PACKAGE_BYTE: u8 = 0x01;
/// Package byte used for every other package.
const APP_PACKAGE_BYTE: u8 = 0x7f;
/// The platform package name.
const PLATFORM_PACKAGE: &str = "android";

/// Assigns identifiers to resource names and maps between the two.
///
/// Automatically assigned identifiers use the `0xPPTTEEEE` layout: package
/// byte `0x01` for `android` and `0x7f` otherwise, a type byte handed out in
/// order of first appearance per package starting at 1, and an entry counter
/// per type.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{ResName, ResourceIndex, ResourceTable};
///
/// let mut table = ResourceTable::new();
/// let color = table.register(&ResName::attr("app", "textColor"));
/// let size = table.register(&ResName::attr("app", "textSize"));
/// let style = table.register(&ResName::style("app", "Theme"));
///
/// assert_eq!(color.get(), 0x7f01_0000);
/// assert_eq!(size.get(), 0x7f01_0001);
/// assert_eq!(style.get(), 0x7f02_0000);
/// assert_eq!(table.resource_name(size), Some(&ResName::attr("app", "textSize")));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ResourceTable {
    names: HashMap<ResourceId, ResName>,
    ids: HashMap<ResName, ResourceId>,
    /// `(package byte, type)` to `(type byte, next entry)`.
    types: HashMap<(u8, String), (u8, u16)>,
    /// Next free type byte per package byte.
    next_type: HashMap<u8, u8>,
}

impl ResourceTable {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier for `name`, assigning a new one if needed.
    ///
    /// # Panics
    ///
    /// Panics if a package runs out of type bytes or a type runs out of
    /// entries.
    pub fn register(&mut self, name: &ResName) -> ResourceId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let package = if name.package() == PLATFORM_PACKAGE {
            PLATFORM_PACKAGE_BYTE
        } else {
            APP_PACKAGE_BYTE
        };
        let next_type = self.next_type.entry(package).or_insert(1);
        let (ty, entry) = self
            .types
            .entry((package, String::from(name.type_name())))
            .or_insert_with(|| {
                let ty = *next_type;
                *next_type = next_type
                    .checked_add(1)
                    .expect("too many resource types in one package");
                (ty, 0)
            });
        let id = ResourceId::from_parts(package, *ty, *entry);
        *entry = entry
            .checked_add(1)
            .expect("too many resource entries of one type");

        self.insert(name.clone(), id);
        id
    }

    /// Maps `name` to an explicit identifier, replacing earlier mappings of
    /// either side.
    pub fn insert(&mut self, name: ResName, id: ResourceId) {
        if let Some(old_name) = self.names.insert(id, name.clone()) {
            self.ids.remove(&old_name);
        }
        if let Some(old_id) = self.ids.insert(name, id)
            && old_id != id
        {
            self.names.remove(&old_id);
        }
    }

    /// Returns the number of mapped names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ResourceIndex for ResourceTable {
    fn resource_id(&self, name: &ResName) -> Option<ResourceId> {
        self.ids.get(name).copied()
    }

    fn resource_name(&self, id: ResourceId) -> Option<&ResName> {
        self.names.get(&id)
    }
}

/// Stand-in for parsed resource files: a table plus qualifier variants of
/// styles and value resources.
///
/// Defining a style registers the style's name and every attribute it sets.
/// Defining a value registers its name. References inside values are not
/// registered, so a reference to something never defined stays dangling.
///
/// Loading a style picks the best-matching variant (most matching qualifier
/// segments, earliest definition on ties) and merges its parent chain. A
/// style without an explicit parent inherits from the style named by its
/// dotted prefix (`Theme.App.Dark` from `Theme.App`) when that style exists
/// in the same package. Merged styles are cached per `(name, qualifiers)`.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{
///     AttrValue, Qualifiers, ResName, ResourceLoader, ResourceRepository, StyleBuilder,
/// };
///
/// let text_color = ResName::attr("app", "textColor");
/// let mut repo = ResourceRepository::new();
/// repo.define_style(
///     "",
///     StyleBuilder::new(ResName::style("app", "Theme"))
///         .set(text_color.clone(), AttrValue::color(0xffff_0000))
///         .build(),
/// );
/// repo.define_style(
///     "night",
///     StyleBuilder::new(ResName::style("app", "Theme"))
///         .set(text_color.clone(), AttrValue::color(0xffff_ffff))
///         .build(),
/// );
///
/// let day = repo.load_style(&ResName::style("app", "Theme"), &Qualifiers::default()).unwrap();
/// let night = repo.load_style(&ResName::style("app", "Theme"), &Qualifiers::new("en-night")).unwrap();
/// assert_eq!(day.get(&text_color), Some(&AttrValue::color(0xffff_0000)));
/// assert_eq!(night.get(&text_color), Some(&AttrValue::color(0xffff_ffff)));
/// ```
#[derive(Debug, Default)]
pub struct ResourceRepository {
    table: ResourceTable,
    styles: HashMap<ResName, Vec<(Qualifiers, Style)>>,
    values: HashMap<ResName, Vec<(Qualifiers, AttrValue)>>,
    merged: RefCell<HashMap<(ResName, Qualifiers), Style>>,
}

impl ResourceRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying table.
    #[must_use]
    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    /// Registers a name without defining anything for it.
    ///
    /// # Panics
    ///
    /// Panics if the id space runs out, as [`ResourceTable::register`] does.
    pub fn register(&mut self, name: &ResName) -> ResourceId {
        self.table.register(name)
    }

    /// Registers an attribute name.
    ///
    /// # Panics
    ///
    /// Panics if the id space runs out, as [`ResourceTable::register`] does.
    pub fn define_attr(&mut self, name: &ResName) -> ResourceId {
        self.table.register(name)
    }

    /// Adds (or replaces) the style variant for `qualifiers` and returns the
    /// style's id.
    ///
    /// # Panics
    ///
    /// Panics if the id space runs out, as [`ResourceTable::register`] does.
    pub fn define_style(&mut self, qualifiers: &str, style: Style) -> ResourceId {
        let id = self.table.register(style.name());
        for (attr, _) in style.entries() {
            self.table.register(attr);
        }
        let name = style.name().clone();
        upsert_variant(self.styles.entry(name).or_default(), qualifiers, style);
        self.merged.get_mut().clear();
        id
    }

    /// Adds (or replaces) the value variant for `qualifiers` and returns the
    /// resource's id.
    ///
    /// # Panics
    ///
    /// Panics if the id space runs out, as [`ResourceTable::register`] does.
    pub fn define_value(&mut self, name: &ResName, qualifiers: &str, value: AttrValue) -> ResourceId {
        let id = self.table.register(name);
        upsert_variant(self.values.entry(name.clone()).or_default(), qualifiers, value);
        id
    }

    fn best_variant<'a, T>(variants: &'a [(Qualifiers, T)], active: &Qualifiers) -> Option<&'a T> {
        let mut best: Option<(usize, &T)> = None;
        for (qualifiers, item) in variants {
            if !qualifiers.matches(active) {
                continue;
            }
            let score = qualifiers.specificity();
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, item));
            }
        }
        best.map(|(_, item)| item)
    }

    fn parent_of(&self, style: &Style) -> Option<ResName> {
        if let Some(parent) = style.parent() {
            return Some(parent.clone());
        }
        let name = style.name();
        let (prefix, _) = name.name().rsplit_once('.')?;
        let implicit = ResName::new(name.package(), name.type_name(), prefix);
        self.styles.contains_key(&implicit).then_some(implicit)
    }

    fn merge(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<Style> {
        let leaf = Self::best_variant(self.styles.get(name)?, qualifiers)?;

        // Collect the chain leaf-first, stopping at missing or repeated links.
        let mut chain: Vec<&Style> = Vec::from([leaf]);
        let mut current = leaf;
        while let Some(parent_name) = self.parent_of(current) {
            if chain.iter().any(|s| *s.name() == parent_name) {
                log::warn!("style {name} has a cyclic parent chain through {parent_name}");
                break;
            }
            let Some(parent) = self
                .styles
                .get(&parent_name)
                .and_then(|variants| Self::best_variant(variants, qualifiers))
            else {
                log::warn!("style {} names missing parent {parent_name}", current.name());
                break;
            };
            chain.push(parent);
            current = parent;
        }

        let mut builder = StyleBuilder::new(name.clone());
        if let Some(parent) = self.parent_of(leaf) {
            builder = builder.parent(parent);
        }
        for style in chain.iter().rev() {
            builder = builder.extend_from(style);
        }
        log::trace!(
            "merged style {name} for {qualifiers:?} from {} variant(s)",
            chain.len()
        );
        Some(builder.build())
    }
}

/// Replaces the variant for `qualifiers`, or appends a new one.
fn upsert_variant<T>(variants: &mut Vec<(Qualifiers, T)>, qualifiers: &str, item: T) {
    match variants.iter_mut().find(|(q, _)| q.as_str() == qualifiers) {
        Some((_, existing)) => *existing = item,
        None => variants.push((Qualifiers::new(qualifiers), item)),
    }
}

impl ResourceIndex for ResourceRepository {
    fn resource_id(&self, name: &ResName) -> Option<ResourceId> {
        self.table.resource_id(name)
    }

    fn resource_name(&self, id: ResourceId) -> Option<&ResName> {
        self.table.resource_name(id)
    }
}

impl ResourceLoader for ResourceRepository {
    fn load_style(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<Style> {
        let key = (name.clone(), qualifiers.clone());
        if let Some(style) = self.merged.borrow().get(&key) {
            return Some(style.clone());
        }
        let style = self.merge(name, qualifiers)?;
        self.merged.borrow_mut().insert(key, style.clone());
        Some(style)
    }

    fn load_value(&self, name: &ResName, qualifiers: &Qualifiers) -> Option<AttrValue> {
        Self::best_variant(self.values.get(name)?, qualifiers).cloned()
    }
}
