// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute resolution through the full precedence chain.
//!
//! This module provides [`AttributeResolver`], which computes the value of
//! each requested attribute from, in order of precedence:
//!
//! **Explicit → Style attribute → Default style (attr) → Default style (res) → Theme**
//!
//! Theme attribute references (`?attr/name`) found along the way are chased
//! through the theme, with a bound on the number of hops.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use understudy_resources::{AttrValue, Qualifiers, ResName, ResourceId, ResourceLoader, Style};

use crate::attribute_set::AttributeSet;
use crate::error::ResolveError;
use crate::options::ResolveOptions;
use crate::theme::{LoadedTheme, Theme};

/// Attributes followed while chasing theme attribute references.
pub type ReferenceChain = SmallVec<[ResName; 2]>;

/// Where a resolved value was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrSource {
    /// The element's own attribute set.
    Explicit,
    /// The style named by the element's `style` attribute.
    StyleAttribute,
    /// The default style found through the default style attribute.
    DefaultStyleAttr,
    /// The default style resource.
    DefaultStyleRes,
    /// The theme, after overlays.
    Theme,
}

/// The resolved value of one requested attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedValue {
    attr: ResName,
    id: ResourceId,
    value: AttrValue,
    source: AttrSource,
    chain: ReferenceChain,
}

impl ResolvedValue {
    /// Returns the requested attribute.
    ///
    /// This is always the attribute that was asked for, even when the value
    /// was reached through theme attribute references.
    #[must_use]
    #[inline]
    pub fn attr(&self) -> &ResName {
        &self.attr
    }

    /// Returns the id of the requested attribute.
    #[must_use]
    #[inline]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the value: a literal or a resource reference, never a theme
    /// attribute reference.
    #[must_use]
    #[inline]
    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Returns where the value was found.
    #[must_use]
    #[inline]
    pub fn source(&self) -> AttrSource {
        self.source
    }

    /// Returns the theme attributes followed to reach the value, in order.
    #[must_use]
    #[inline]
    pub fn chain(&self) -> &[ResName] {
        &self.chain
    }
}

/// The outcome of one resolution call.
///
/// There is one slot per requested attribute, in request order. A slot is
/// `None` when no source has a value for the attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedAttributes {
    values: Vec<Option<ResolvedValue>>,
    position: String,
}

impl ResolvedAttributes {
    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the resolved value at `index`, if there is one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ResolvedValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Returns an iterator over all slots.
    pub fn iter(&self) -> impl Iterator<Item = Option<&ResolvedValue>> + '_ {
        self.values.iter().map(Option::as_ref)
    }

    /// Returns the position description of the attribute set used, or an
    /// empty string.
    #[must_use]
    pub fn position_description(&self) -> &str {
        &self.position
    }
}

/// Resolves attributes against one loader and one set of qualifiers.
///
/// A resolver is a cheap, stateless view; every call starts from scratch.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, Qualifiers, ResName, ResourceRepository, StyleBuilder};
/// use understudy_style::{AttrSource, AttributeResolver, ResolveOptions, Theme};
///
/// let text_color = ResName::attr("app", "textColor");
/// let mut repo = ResourceRepository::new();
/// let theme_id = repo.define_style(
///     "",
///     StyleBuilder::new(ResName::style("app", "Theme"))
///         .set(text_color.clone(), AttrValue::color(0xffff_0000))
///         .build(),
/// );
/// let text_color_id = repo.define_attr(&text_color);
///
/// let mut theme = Theme::new();
/// theme.apply_style(theme_id, false);
///
/// let qualifiers = Qualifiers::default();
/// let resolver = AttributeResolver::new(&repo, &qualifiers, ResolveOptions::default());
/// let resolved = resolver
///     .resolve(&[text_color_id], None, None, None, Some(&theme))
///     .unwrap();
///
/// let value = resolved.get(0).unwrap();
/// assert_eq!(value.value(), &AttrValue::color(0xffff_0000));
/// assert_eq!(value.source(), AttrSource::Theme);
/// ```
pub struct AttributeResolver<'a, L: ResourceLoader + ?Sized> {
    loader: &'a L,
    qualifiers: &'a Qualifiers,
    options: ResolveOptions,
}

impl<L: ResourceLoader + ?Sized> fmt::Debug for AttributeResolver<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeResolver")
            .field("loader", &core::any::type_name::<L>())
            .field("qualifiers", &self.qualifiers)
            .field("options", &self.options)
            .finish()
    }
}

impl<'a, L: ResourceLoader + ?Sized> AttributeResolver<'a, L> {
    /// Creates a resolver.
    pub fn new(loader: &'a L, qualifiers: &'a Qualifiers, options: ResolveOptions) -> Self {
        Self {
            loader,
            qualifiers,
            options,
        }
    }

    /// Returns the loader.
    #[must_use]
    #[inline]
    pub fn loader(&self) -> &'a L {
        self.loader
    }

    /// Returns the qualifiers styles are loaded with.
    #[must_use]
    #[inline]
    pub fn qualifiers(&self) -> &'a Qualifiers {
        self.qualifiers
    }

    /// Returns the options.
    #[must_use]
    #[inline]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolves `attrs`, loading `theme` with the current qualifiers first.
    ///
    /// A theme with no style applied counts as no theme at all.
    ///
    /// # Errors
    ///
    /// See [`AttributeResolver::resolve_loaded`]. Loading the theme fails
    /// with [`ResolveError::ResourceNotFound`] or
    /// [`ResolveError::StyleNotFound`] if one of its styles is missing.
    pub fn resolve(
        &self,
        attrs: &[ResourceId],
        set: Option<&AttributeSet>,
        def_style_attr: Option<ResourceId>,
        def_style_res: Option<ResourceId>,
        theme: Option<&Theme>,
    ) -> Result<ResolvedAttributes, ResolveError> {
        let loaded = theme
            .filter(|theme| !theme.is_empty())
            .map(|theme| theme.load(self.loader, self.qualifiers))
            .transpose()?;
        self.resolve_loaded(attrs, set, def_style_attr, def_style_res, loaded.as_ref())
    }

    /// Resolves `attrs` against an already loaded theme.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::ResourceNotFound`] if the `style` attribute or
    ///   `def_style_res` is an unknown id.
    /// - [`ResolveError::StyleNotFound`] if one of those names a style with no
    ///   variant for the current qualifiers.
    /// - [`ResolveError::ThemeRequired`] if a theme attribute reference has to
    ///   be followed and there is no theme.
    /// - [`ResolveError::CyclicReference`] if a reference chain exceeds
    ///   [`ResolveOptions::max_chase_hops`].
    /// - [`ResolveError::UnresolvedReference`] if the `style` attribute names
    ///   an attribute that does not lead to a style.
    pub fn resolve_loaded(
        &self,
        attrs: &[ResourceId],
        set: Option<&AttributeSet>,
        def_style_attr: Option<ResourceId>,
        def_style_res: Option<ResourceId>,
        theme: Option<&LoadedTheme>,
    ) -> Result<ResolvedAttributes, ResolveError> {
        let from_attr = match (def_style_attr, theme) {
            (Some(id), Some(theme)) => self.default_style_from_attr(id, theme)?,
            _ => None,
        };
        let style_attribute = match set.and_then(AttributeSet::style_attribute) {
            Some(id) => Some(self.style_attribute_style(id, theme)?),
            None => None,
        };

        let above_res = Sources {
            explicit: set,
            style_attribute: style_attribute.as_ref(),
            def_style_attr: from_attr.as_ref(),
            def_style_res: None,
            theme,
        };
        let from_res = match def_style_res {
            Some(id) => self.default_style_from_res(id, &above_res)?,
            None => None,
        };
        let sources = Sources {
            def_style_res: from_res.as_ref(),
            ..above_res
        };

        let mut values = Vec::with_capacity(attrs.len());
        for &id in attrs {
            let Some(attr) = self.loader.resource_name(id) else {
                log::debug!("requested attribute {id} is unknown");
                values.push(None);
                continue;
            };
            values.push(self.resolve_one(id, attr, &sources)?);
        }

        Ok(ResolvedAttributes {
            values,
            position: set
                .map(|set| String::from(set.position_description()))
                .unwrap_or_default(),
        })
    }

    fn resolve_one(
        &self,
        id: ResourceId,
        attr: &ResName,
        sources: &Sources<'_>,
    ) -> Result<Option<ResolvedValue>, ResolveError> {
        let Some((found, source)) = sources.find(attr) else {
            log::trace!("{attr}: no value in any source");
            return Ok(None);
        };
        let Some((value, chain)) = self.chase(attr, found, sources.theme)? else {
            log::debug!("{attr}: theme attribute reference from {source:?} leads nowhere");
            return Ok(None);
        };
        log::debug!("{attr} = {value} from {source:?}");
        Ok(Some(ResolvedValue {
            attr: attr.clone(),
            id,
            value: value.clone(),
            source,
            chain,
        }))
    }

    /// Follows theme attribute references from `start` until something else
    /// turns up. `Ok(None)` means a link was missing from the theme.
    fn chase<'v>(
        &self,
        attr: &ResName,
        start: &'v AttrValue,
        theme: Option<&'v LoadedTheme>,
    ) -> Result<Option<(&'v AttrValue, ReferenceChain)>, ResolveError> {
        let mut chain = ReferenceChain::new();
        let mut current = start;
        while let AttrValue::StyleAttr(reference) = current {
            let Some(theme) = theme else {
                return Err(ResolveError::ThemeRequired {
                    attr: attr.clone(),
                    reference: reference.clone(),
                });
            };
            if chain.len() >= self.options.max_chase_hops() {
                return Err(ResolveError::CyclicReference {
                    attr: attr.clone(),
                    hops: self.options.max_chase_hops(),
                });
            }
            log::trace!("{attr}: following ?{reference}");
            chain.push(reference.clone());
            match theme.lookup(reference) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some((current, chain)))
    }

    fn load_style(&self, name: &ResName) -> Result<Style, ResolveError> {
        self.loader
            .load_style(name, self.qualifiers)
            .ok_or_else(|| ResolveError::StyleNotFound(name.clone()))
    }

    /// The default style named by the theme's value of `def_style_attr`.
    /// Every missing link makes it absent.
    fn default_style_from_attr(
        &self,
        def_style_attr: ResourceId,
        theme: &LoadedTheme,
    ) -> Result<Option<Style>, ResolveError> {
        let Some(attr) = self.loader.resource_name(def_style_attr) else {
            log::debug!("default style attribute {def_style_attr} is unknown");
            return Ok(None);
        };
        let Some(value) = theme.lookup(attr) else {
            log::debug!("theme has no default style for {attr}");
            return Ok(None);
        };
        let Some((value, _)) = self.chase(attr, value, Some(theme))? else {
            return Ok(None);
        };
        let style = value
            .resource_reference()
            .and_then(|name| self.loader.load_style(name, self.qualifiers));
        if style.is_none() {
            log::debug!("default style attribute {attr} = {value} is not a loadable style");
        }
        Ok(style)
    }

    /// The style named by an element's `style` attribute. Attribute names are
    /// looked up in the theme until a style name turns up.
    fn style_attribute_style(
        &self,
        style: ResourceId,
        theme: Option<&LoadedTheme>,
    ) -> Result<Style, ResolveError> {
        let origin = self
            .loader
            .resource_name(style)
            .ok_or(ResolveError::ResourceNotFound(style))?;
        let mut name = origin;
        let mut hops = 0;
        while name.is_attr() {
            let Some(theme) = theme else {
                return Err(ResolveError::ThemeRequired {
                    attr: origin.clone(),
                    reference: name.clone(),
                });
            };
            if hops >= self.options.max_chase_hops() {
                return Err(ResolveError::CyclicReference {
                    attr: origin.clone(),
                    hops,
                });
            }
            hops += 1;
            name = match theme.lookup(name) {
                Some(AttrValue::Resource(next) | AttrValue::StyleAttr(next)) => next,
                _ => return Err(ResolveError::UnresolvedReference { attr: name.clone() }),
            };
        }
        log::trace!("style attribute {origin} names {name}");
        self.load_style(name)
    }

    /// The default style named by `def_style_res`, which may be an attribute
    /// looked up through the higher-precedence sources.
    fn default_style_from_res(
        &self,
        def_style_res: ResourceId,
        sources: &Sources<'_>,
    ) -> Result<Option<Style>, ResolveError> {
        let name = self
            .loader
            .resource_name(def_style_res)
            .ok_or(ResolveError::ResourceNotFound(def_style_res))?;
        if !name.is_attr() {
            return self.load_style(name).map(Some);
        }

        let Some((found, _)) = sources.find(name) else {
            log::debug!("no default style found for {name}");
            return Ok(None);
        };
        let Some((value, _)) = self.chase(name, found, sources.theme)? else {
            return Ok(None);
        };
        match value.resource_reference() {
            Some(style) => self.load_style(style).map(Some),
            None => {
                log::debug!("default style resource {name} = {value} is not a style reference");
                Ok(None)
            }
        }
    }
}

/// The sources of one resolution call, highest precedence first.
#[derive(Copy, Clone)]
struct Sources<'s> {
    explicit: Option<&'s AttributeSet>,
    style_attribute: Option<&'s Style>,
    def_style_attr: Option<&'s Style>,
    def_style_res: Option<&'s Style>,
    theme: Option<&'s LoadedTheme>,
}

impl<'s> Sources<'s> {
    fn find(&self, attr: &ResName) -> Option<(&'s AttrValue, AttrSource)> {
        let styles = [
            (self.style_attribute, AttrSource::StyleAttribute),
            (self.def_style_attr, AttrSource::DefaultStyleAttr),
            (self.def_style_res, AttrSource::DefaultStyleRes),
        ];
        self.explicit
            .and_then(|set| set.get(attr))
            .map(|value| (value, AttrSource::Explicit))
            .or_else(|| {
                styles.into_iter().find_map(|(style, source)| {
                    style.and_then(|style| style.get(attr)).map(|value| (value, source))
                })
            })
            .or_else(|| {
                self.theme
                    .and_then(|theme| theme.lookup(attr))
                    .map(|value| (value, AttrSource::Theme))
            })
    }
}
