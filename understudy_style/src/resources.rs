// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resources facade.

use alloc::string::String;

use understudy_resources::{Qualifiers, ResName, ResourceId, ResourceLoader};

use crate::attribute_set::AttributeSet;
use crate::error::ResolveError;
use crate::options::ResolveOptions;
use crate::resolve::AttributeResolver;
use crate::theme::Theme;
use crate::typed::TypedAttributes;

/// A loaded resource table together with the current qualifiers.
///
/// This is the entry point most callers use: it answers identifier and name
/// queries and obtains typed attributes for elements. Every call loads styles
/// with the qualifiers current at the time of the call.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, ResName, ResourceRepository, StyleBuilder};
/// use understudy_style::Resources;
///
/// let text_color = ResName::attr("app", "textColor");
/// let mut repo = ResourceRepository::new();
/// let theme_id = repo.define_style(
///     "",
///     StyleBuilder::new(ResName::style("app", "Theme"))
///         .set(text_color.clone(), AttrValue::color(0xffff_0000))
///         .build(),
/// );
///
/// let resources = Resources::new(repo);
/// let text_color_id = resources.identifier("textColor", "attr", "app").unwrap();
///
/// let mut theme = resources.new_theme();
/// theme.apply_style(theme_id, false);
///
/// let typed = resources
///     .obtain_styled_attributes(&theme, None, &[text_color_id], None, None)
///     .unwrap();
/// assert_eq!(typed.get_color(0, 0), 0xffff_0000);
/// ```
#[derive(Debug)]
pub struct Resources<L> {
    loader: L,
    qualifiers: Qualifiers,
    options: ResolveOptions,
}

impl<L: ResourceLoader> Resources<L> {
    /// Wraps a loader with default qualifiers and options.
    pub fn new(loader: L) -> Self {
        Self::with_options(loader, ResolveOptions::default())
    }

    /// Wraps a loader with default qualifiers and the given options.
    pub fn with_options(loader: L, options: ResolveOptions) -> Self {
        Self {
            loader,
            qualifiers: Qualifiers::default(),
            options,
        }
    }

    /// Returns the loader.
    #[must_use]
    #[inline]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the current qualifiers.
    #[must_use]
    #[inline]
    pub fn qualifiers(&self) -> &Qualifiers {
        &self.qualifiers
    }

    /// Changes the qualifiers used by later calls.
    pub fn set_qualifiers(&mut self, qualifiers: impl Into<Qualifiers>) {
        self.qualifiers = qualifiers.into();
        log::debug!("qualifiers now {:?}", self.qualifiers);
    }

    /// Returns the options.
    #[must_use]
    #[inline]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Returns a resolver for the current qualifiers.
    #[must_use]
    pub fn resolver(&self) -> AttributeResolver<'_, L> {
        AttributeResolver::new(&self.loader, &self.qualifiers, self.options)
    }

    /// Looks up the id of `name`, which may be `name`, `type/name` or
    /// `package:type/name`. Missing parts come from `def_type` and
    /// `def_package`.
    #[must_use]
    pub fn identifier(&self, name: &str, def_type: &str, def_package: &str) -> Option<ResourceId> {
        let name = ResName::qualify(name, def_package, def_type)?;
        self.loader.resource_id(&name)
    }

    fn name_of(&self, id: ResourceId) -> Result<&ResName, ResolveError> {
        self.loader
            .resource_name(id)
            .ok_or(ResolveError::ResourceNotFound(id))
    }

    /// Returns the `package:type/name` form of `id`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ResourceNotFound`] if `id` is unknown. The same holds
    /// for the other name queries.
    pub fn resource_name(&self, id: ResourceId) -> Result<String, ResolveError> {
        self.name_of(id).map(ResName::fully_qualified)
    }

    /// Returns the package of `id`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ResourceNotFound`] if `id` is unknown.
    pub fn resource_package_name(&self, id: ResourceId) -> Result<&str, ResolveError> {
        self.name_of(id).map(ResName::package)
    }

    /// Returns the type of `id`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ResourceNotFound`] if `id` is unknown.
    pub fn resource_type_name(&self, id: ResourceId) -> Result<&str, ResolveError> {
        self.name_of(id).map(ResName::type_name)
    }

    /// Returns the entry name of `id`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ResourceNotFound`] if `id` is unknown.
    pub fn resource_entry_name(&self, id: ResourceId) -> Result<&str, ResolveError> {
        self.name_of(id).map(ResName::name)
    }

    /// Obtains `attrs` from an attribute set alone: no theme, no default
    /// styles.
    ///
    /// # Errors
    ///
    /// Any [`ResolveError`]; a theme attribute reference in `set` fails with
    /// [`ResolveError::ThemeRequired`].
    pub fn obtain_attributes(
        &self,
        set: &AttributeSet,
        attrs: &[ResourceId],
    ) -> Result<TypedAttributes, ResolveError> {
        let resolver = self.resolver();
        let resolved = resolver.resolve(attrs, Some(set), None, None, None)?;
        TypedAttributes::build(&resolved, &resolver)
    }

    /// Obtains `attrs` through the full precedence chain.
    ///
    /// # Errors
    ///
    /// Any [`ResolveError`] raised while loading the theme, resolving or
    /// packing. See [`AttributeResolver::resolve_loaded`].
    pub fn obtain_styled_attributes(
        &self,
        theme: &Theme,
        set: Option<&AttributeSet>,
        attrs: &[ResourceId],
        def_style_attr: Option<ResourceId>,
        def_style_res: Option<ResourceId>,
    ) -> Result<TypedAttributes, ResolveError> {
        let resolver = self.resolver();
        let resolved = resolver
            .resolve(attrs, set, def_style_attr, def_style_res, Some(theme))
            .inspect_err(|err| {
                if let Some(set) = set {
                    log::debug!("failed at {}: {err}", set.position_description());
                }
            })?;
        TypedAttributes::build(&resolved, &resolver)
    }

    /// Creates an empty theme.
    #[must_use]
    pub fn new_theme(&self) -> Theme {
        Theme::new()
    }
}
