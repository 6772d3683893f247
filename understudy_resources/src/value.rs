// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute values.
//!
//! An [`AttrValue`] is exactly one of a [`Literal`], a reference to another
//! resource, or a reference to a theme attribute. Resolution only ever
//! matches on these three cases.

use alloc::string::String;
use core::fmt;

use crate::config::ConfigChanges;
use crate::id::ResName;

/// Units for [`LiteralData::Dimension`].
///
/// Discriminants match the platform's complex-unit encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DimensionUnit {
    /// Raw pixels.
    Px = 0,
    /// Density-independent pixels.
    Dp = 1,
    /// Scale-independent pixels.
    Sp = 2,
    /// Points (1/72 inch).
    Pt = 3,
    /// Inches.
    In = 4,
    /// Millimeters.
    Mm = 5,
}

impl DimensionUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "px" => Self::Px,
            "dp" | "dip" => Self::Dp,
            "sp" => Self::Sp,
            "pt" => Self::Pt,
            "in" => Self::In,
            "mm" => Self::Mm,
            _ => return None,
        })
    }

    /// Returns the number of pixels in one unit at the given display density.
    ///
    /// `density` is the scale factor relative to a 160 dpi screen.
    #[must_use]
    pub fn to_px(self, value: f32, density: f32) -> f32 {
        let xdpi = density * 160.0;
        match self {
            Self::Px => value,
            Self::Dp | Self::Sp => value * density,
            Self::Pt => value * xdpi / 72.0,
            Self::In => value * xdpi,
            Self::Mm => value * xdpi / 25.4,
        }
    }
}

/// The payload of a [`Literal`].
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralData {
    /// An explicit "no value" (`@null`). Stops lookup but is never populated.
    Null,
    /// A boolean.
    Bool(bool),
    /// A decimal or hex integer.
    Int(i32),
    /// An ARGB color.
    Color(u32),
    /// A plain float.
    Float(f32),
    /// A float with a unit.
    Dimension(f32, DimensionUnit),
    /// A string.
    Str(String),
}

/// A concrete attribute value.
///
/// Besides the payload, a literal carries the asset cookie of the package it
/// came from, the configuration dimensions it depends on and the density of
/// the variant it was loaded from. Resolution passes all three through
/// unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    /// The payload.
    pub data: LiteralData,
    /// Asset cookie of the originating package.
    pub asset_cookie: i32,
    /// Configuration dimensions this value varies over.
    pub changing_configurations: ConfigChanges,
    /// Density of the originating variant, or 0.
    pub density: u16,
}

impl Literal {
    /// Wraps a payload with no origin information.
    #[must_use]
    pub fn new(data: LiteralData) -> Self {
        Self {
            data,
            asset_cookie: 0,
            changing_configurations: ConfigChanges::empty(),
            density: 0,
        }
    }

    /// Returns a copy with the given asset cookie.
    #[must_use]
    pub fn with_asset_cookie(mut self, asset_cookie: i32) -> Self {
        self.asset_cookie = asset_cookie;
        self
    }

    /// Returns a copy with the given changing configurations.
    #[must_use]
    pub fn with_changing_configurations(mut self, changes: ConfigChanges) -> Self {
        self.changing_configurations = changes;
        self
    }

    /// Returns a copy with the given density.
    #[must_use]
    pub fn with_density(mut self, density: u16) -> Self {
        self.density = density;
        self
    }

    /// Returns `true` for an `@null` literal.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.data, LiteralData::Null)
    }
}

/// A value found in a style, theme or attribute set.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, LiteralData, ResName};
///
/// let value = AttrValue::parse("?attr/colorAccent", "app");
/// assert_eq!(value.style_reference(), Some(&ResName::attr("app", "colorAccent")));
///
/// let value = AttrValue::parse("@color/red", "app");
/// assert_eq!(value.resource_reference(), Some(&ResName::new("app", "color", "red")));
///
/// let value = AttrValue::parse("#ff0000", "app");
/// assert_eq!(value.literal().map(|l| &l.data), Some(&LiteralData::Color(0xffff0000)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A concrete value.
    Literal(Literal),
    /// A reference to another resource, resolved as a resource.
    Resource(ResName),
    /// A reference to an attribute, looked up in the active theme.
    StyleAttr(ResName),
}

impl AttrValue {
    /// Shorthand for a literal without origin information.
    #[must_use]
    pub fn literal_data(data: LiteralData) -> Self {
        Self::Literal(Literal::new(data))
    }

    /// Shorthand for a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::literal_data(LiteralData::Str(value.into()))
    }

    /// Shorthand for a color literal.
    #[must_use]
    pub fn color(argb: u32) -> Self {
        Self::literal_data(LiteralData::Color(argb))
    }

    /// Parses the textual form used in resource files.
    ///
    /// References and `@null` are recognized first; then booleans, colors,
    /// integers, dimensions and floats. Anything else is a string. Partial
    /// reference names are qualified with `package`.
    #[must_use]
    pub fn parse(text: &str, package: &str) -> Self {
        let trimmed = text.trim();
        if trimmed == "@null" {
            return Self::literal_data(LiteralData::Null);
        }
        if trimmed.starts_with('?')
            && let Some(name) = ResName::qualify(trimmed, package, ResName::ATTR)
        {
            return Self::StyleAttr(name);
        }
        if trimmed.starts_with('@')
            && !trimmed.starts_with("@+")
            && let Some(name) = ResName::qualify(trimmed, package, ResName::STYLE)
            && trimmed.contains('/')
        {
            return Self::Resource(name);
        }
        Self::literal_data(parse_literal(trimmed).unwrap_or_else(|| LiteralData::Str(text.into())))
    }

    /// Returns the literal, if this is one.
    #[must_use]
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Returns the referenced resource, if this is a resource reference.
    #[must_use]
    pub fn resource_reference(&self) -> Option<&ResName> {
        match self {
            Self::Resource(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the referenced attribute, if this is a theme attribute reference.
    #[must_use]
    pub fn style_reference(&self) -> Option<&ResName> {
        match self {
            Self::StyleAttr(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` for a literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns `true` for a resource reference.
    #[must_use]
    pub fn is_resource_reference(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    /// Returns `true` for a theme attribute reference.
    #[must_use]
    pub fn is_style_reference(&self) -> bool {
        matches!(self, Self::StyleAttr(_))
    }

    /// Returns `true` for an `@null` literal.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.literal().is_some_and(Literal::is_null)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => match &literal.data {
                LiteralData::Null => f.write_str("@null"),
                LiteralData::Bool(b) => write!(f, "{b}"),
                LiteralData::Int(i) => write!(f, "{i}"),
                LiteralData::Color(c) => write!(f, "#{c:08x}"),
                LiteralData::Float(v) => write!(f, "{v}"),
                LiteralData::Dimension(v, unit) => write!(f, "{v}{unit:?}"),
                LiteralData::Str(s) => write!(f, "{s:?}"),
            },
            Self::Resource(name) => write!(f, "@{name}"),
            Self::StyleAttr(name) => write!(f, "?{name}"),
        }
    }
}

fn parse_literal(text: &str) -> Option<LiteralData> {
    match text {
        "true" => return Some(LiteralData::Bool(true)),
        "false" => return Some(LiteralData::Bool(false)),
        _ => {}
    }
    if let Some(hex) = text.strip_prefix('#') {
        return parse_color(hex).map(LiteralData::Color);
    }
    if let Some(hex) = text.strip_prefix("0x") {
        return u32::from_str_radix(hex, 16)
            .ok()
            .map(|v| LiteralData::Int(v.cast_signed()));
    }
    if let Ok(v) = text.parse::<i32>() {
        return Some(LiteralData::Int(v));
    }
    let split = text
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (number, suffix) = text.split_at(split);
    let value = number.parse::<f32>().ok()?;
    if suffix.is_empty() {
        return Some(LiteralData::Float(value));
    }
    DimensionUnit::from_suffix(suffix).map(|unit| LiteralData::Dimension(value, unit))
}

fn parse_color(hex: &str) -> Option<u32> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let raw = u32::from_str_radix(hex, 16).ok()?;
    // Short forms repeat each nibble.
    let expand = |v: u32, nibbles: u32| {
        (0..nibbles).rev().fold(0_u32, |acc, i| {
            let n = (v >> (i * 4)) & 0xf;
            (acc << 8) | (n << 4) | n
        })
    };
    match hex.len() {
        3 => Some(0xff00_0000 | expand(raw, 3)),
        4 => Some(expand(raw, 4)),
        6 => Some(0xff00_0000 | raw),
        8 => Some(raw),
        _ => None,
    }
}
