// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed, array-packed resolution results.
//!
//! [`TypedAttributes`] packs [`ResolvedAttributes`] the way a native typed
//! array does: six words per requested attribute, a side table for strings
//! and a compact index of the populated slots.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use understudy_resources::{
    AttrValue, DimensionUnit, Literal, LiteralData, ResName, ResourceId, ResourceLoader,
};

use crate::error::ResolveError;
use crate::resolve::{AttributeResolver, ResolvedAttributes};

/// Offset of the type tag within a slot.
pub const STYLE_TYPE: usize = 0;
/// Offset of the data word within a slot.
pub const STYLE_DATA: usize = 1;
/// Offset of the asset cookie within a slot.
pub const STYLE_ASSET_COOKIE: usize = 2;
/// Offset of the resource id within a slot.
pub const STYLE_RESOURCE_ID: usize = 3;
/// Offset of the changing-configurations mask within a slot.
pub const STYLE_CHANGING_CONFIGURATIONS: usize = 4;
/// Offset of the density within a slot.
pub const STYLE_DENSITY: usize = 5;
/// Number of words per slot.
pub const STYLE_NUM_ENTRIES: usize = 6;

/// Type tag of a packed value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    /// No value.
    Null = 0x00,
    /// A reference to a resource; the data is its id.
    Reference = 0x01,
    /// A reference to a theme attribute; the data is its id.
    Attribute = 0x02,
    /// A string; the data is the slot's index in the string table.
    String = 0x03,
    /// An IEEE float; the data is its bits.
    Float = 0x04,
    /// A complex dimension.
    Dimension = 0x05,
    /// A decimal integer.
    IntDec = 0x10,
    /// A boolean; the data is -1 for true and 0 for false.
    IntBoolean = 0x12,
    /// An ARGB color.
    IntColorArgb8 = 0x1c,
}

impl ValueType {
    /// Returns the type for a raw tag.
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0x00 => Self::Null,
            0x01 => Self::Reference,
            0x02 => Self::Attribute,
            0x03 => Self::String,
            0x04 => Self::Float,
            0x05 => Self::Dimension,
            0x10 => Self::IntDec,
            0x12 => Self::IntBoolean,
            0x1c => Self::IntColorArgb8,
            _ => return None,
        })
    }
}

const COMPLEX_UNIT_MASK: u32 = 0xf;
const COMPLEX_RADIX_SHIFT: u32 = 4;
const COMPLEX_RADIX_MASK: u32 = 0x3;
const COMPLEX_MANTISSA_SHIFT: u32 = 8;
const COMPLEX_MANTISSA_MASK: u32 = 0x00ff_ffff;

const RADIX_23P0: u32 = 0;
const RADIX_16P7: u32 = 1;
const RADIX_8P15: u32 = 2;
const RADIX_0P23: u32 = 3;

/// Scale of a mantissa still shifted into place, per radix.
const RADIX_MULTS: [f32; 4] = [
    1.0 / 256.0,
    1.0 / 32_768.0,
    1.0 / 8_388_608.0,
    1.0 / 2_147_483_648.0,
];

/// Packs a float and unit into the complex dimension format.
///
/// Magnitudes beyond the 24-bit mantissa saturate.
///
/// # Example
///
/// ```rust
/// use understudy_resources::DimensionUnit;
/// use understudy_style::{complex_to_float, encode_dimension};
///
/// assert_eq!(encode_dimension(16.0, DimensionUnit::Dp), 0x1001);
/// assert_eq!(encode_dimension(1.5, DimensionUnit::Px), 0x00c0_0020);
/// assert_eq!(complex_to_float(0x00c0_0020), 1.5);
/// ```
#[must_use]
pub fn encode_dimension(value: f32, unit: DimensionUnit) -> u32 {
    float_to_complex(value) | (unit as u32 & COMPLEX_UNIT_MASK)
}

/// Decodes the value of a complex dimension, ignoring its unit.
#[must_use]
pub fn complex_to_float(complex: u32) -> f32 {
    let mantissa = (complex & (COMPLEX_MANTISSA_MASK << COMPLEX_MANTISSA_SHIFT)).cast_signed();
    let radix = (complex >> COMPLEX_RADIX_SHIFT) & COMPLEX_RADIX_MASK;
    mantissa as f32 * RADIX_MULTS[radix as usize]
}

/// Decodes the unit of a complex dimension.
#[must_use]
pub fn complex_unit(complex: u32) -> Option<DimensionUnit> {
    Some(match complex & COMPLEX_UNIT_MASK {
        0 => DimensionUnit::Px,
        1 => DimensionUnit::Dp,
        2 => DimensionUnit::Sp,
        3 => DimensionUnit::Pt,
        4 => DimensionUnit::In,
        5 => DimensionUnit::Mm,
        _ => return None,
    })
}

fn float_to_complex(value: f32) -> u32 {
    let magnitude = if value < 0.0 { -value } else { value };
    let (mantissa, radix) = if value == round(value) as f32 {
        (round(value), RADIX_23P0)
    } else if magnitude < 1.0 {
        (round(value * 8_388_608.0), RADIX_0P23)
    } else if magnitude < 256.0 {
        (round(value * 32_768.0), RADIX_8P15)
    } else if magnitude < 65_536.0 {
        (round(value * 128.0), RADIX_16P7)
    } else {
        (round(value), RADIX_23P0)
    };
    let mantissa = mantissa.clamp(-0x0080_0000, 0x007f_ffff).cast_unsigned();
    ((mantissa & COMPLEX_MANTISSA_MASK) << COMPLEX_MANTISSA_SHIFT) | (radix << COMPLEX_RADIX_SHIFT)
}

/// Rounds half up, saturating at the `i32` range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, which is the wanted clamp"
)]
fn round(value: f32) -> i32 {
    let shifted = value + 0.5;
    let truncated = shifted as i32;
    // Truncation rounds toward zero; step down for negative fractions.
    if (truncated as f32) > shifted {
        truncated - 1
    } else {
        truncated
    }
}

/// Resolution results packed into parallel arrays.
///
/// # Example
///
/// ```rust
/// use understudy_resources::{AttrValue, Qualifiers, ResName, ResourceRepository};
/// use understudy_style::{
///     AttributeResolver, AttributeSet, ResolveOptions, TypedAttributes, ValueType,
/// };
///
/// let mut repo = ResourceRepository::new();
/// let text = repo.define_attr(&ResName::attr("app", "text"));
/// let enabled = repo.define_attr(&ResName::attr("app", "enabled"));
/// let set = AttributeSet::new()
///     .with(ResName::attr("app", "text"), AttrValue::string("Hi"))
///     .with(ResName::attr("app", "enabled"), AttrValue::parse("true", "app"));
///
/// let qualifiers = Qualifiers::default();
/// let resolver = AttributeResolver::new(&repo, &qualifiers, ResolveOptions::default());
/// let resolved = resolver.resolve(&[text, enabled], Some(&set), None, None, None).unwrap();
/// let typed = TypedAttributes::build(&resolved, &resolver).unwrap();
///
/// assert_eq!(typed.get_string(0), Some("Hi"));
/// assert_eq!(typed.get_boolean(1, false), true);
/// assert_eq!(typed.peek(1), Some(ValueType::IntBoolean));
/// assert_eq!(typed.index_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TypedAttributes {
    data: Vec<i32>,
    strings: Vec<Option<String>>,
    indices: Vec<i32>,
    density: f32,
    position: String,
}

impl TypedAttributes {
    /// Packs `resolved`, dereferencing resource references through the
    /// resolver's loader.
    ///
    /// `@null` values are not populated. A reference to a value resource
    /// takes that resource's value, with the resource id set to the last
    /// reference followed. Any other reference is packed as a
    /// [`ValueType::Reference`].
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownResource`] if a reference names a resource the
    /// index does not know, and [`ResolveError::CyclicReference`] if value
    /// resources reference each other beyond the hop bound.
    pub fn build<L: ResourceLoader + ?Sized>(
        resolved: &ResolvedAttributes,
        resolver: &AttributeResolver<'_, L>,
    ) -> Result<Self, ResolveError> {
        let len = resolved.len();
        let mut typed = Self {
            data: vec![0; len * STYLE_NUM_ENTRIES],
            strings: vec![None; len],
            indices: vec![0; 1],
            density: resolver.options().display_density(),
            position: String::from(resolved.position_description()),
        };

        for (index, slot) in resolved.iter().enumerate() {
            let Some(value) = slot else {
                continue;
            };
            let (packed, resource_id) = Self::dereference(value.value(), resolver)?;
            if typed.pack(index, &packed, resource_id) {
                typed.indices.push(slot_number(index));
            }
        }
        typed.indices[0] = slot_number(typed.indices.len() - 1);
        Ok(typed)
    }

    /// Follows resource references down to something packable.
    fn dereference<L: ResourceLoader + ?Sized>(
        value: &AttrValue,
        resolver: &AttributeResolver<'_, L>,
    ) -> Result<(Packed, Option<ResourceId>), ResolveError> {
        let loader = resolver.loader();
        let max_hops = resolver.options().max_chase_hops();
        let mut current = value.clone();
        let mut resource_id = None;
        let mut hops = 0;
        loop {
            match current {
                AttrValue::Literal(literal) => return Ok((Packed::Literal(literal), resource_id)),
                AttrValue::StyleAttr(name) => {
                    let id = known_id(loader, &name)?;
                    return Ok((Packed::Attribute(id), resource_id));
                }
                AttrValue::Resource(name) => {
                    let id = known_id(loader, &name)?;
                    resource_id = Some(id);
                    let Some(next) = loader.load_value(&name, resolver.qualifiers()) else {
                        return Ok((Packed::Reference(id), resource_id));
                    };
                    if hops >= max_hops {
                        return Err(ResolveError::CyclicReference {
                            attr: name,
                            hops: max_hops,
                        });
                    }
                    hops += 1;
                    log::trace!("{name} = {next}");
                    current = next;
                }
            }
        }
    }

    /// Writes one slot. Returns `false` for values that are not populated.
    fn pack(&mut self, index: usize, packed: &Packed, resource_id: Option<ResourceId>) -> bool {
        let (ty, data, cookie, changes, density) = match packed {
            Packed::Reference(id) => (ValueType::Reference, id.get().cast_signed(), 0, 0, 0),
            Packed::Attribute(id) => (ValueType::Attribute, id.get().cast_signed(), 0, 0, 0),
            Packed::Literal(literal) => {
                let (ty, data) = match &literal.data {
                    LiteralData::Null => return false,
                    LiteralData::Bool(b) => (ValueType::IntBoolean, if *b { -1 } else { 0 }),
                    LiteralData::Int(i) => (ValueType::IntDec, *i),
                    LiteralData::Color(argb) => (ValueType::IntColorArgb8, argb.cast_signed()),
                    LiteralData::Float(f) => (ValueType::Float, f.to_bits().cast_signed()),
                    LiteralData::Dimension(v, unit) => {
                        (ValueType::Dimension, encode_dimension(*v, *unit).cast_signed())
                    }
                    LiteralData::Str(s) => {
                        self.strings[index] = Some(s.clone());
                        (ValueType::String, slot_number(index))
                    }
                };
                (
                    ty,
                    data,
                    literal.asset_cookie,
                    literal.changing_configurations.bits().cast_signed(),
                    i32::from(literal.density),
                )
            }
        };
        let slot = &mut self.data[index * STYLE_NUM_ENTRIES..(index + 1) * STYLE_NUM_ENTRIES];
        slot[STYLE_TYPE] = ty as i32;
        slot[STYLE_DATA] = data;
        slot[STYLE_ASSET_COOKIE] = cookie;
        slot[STYLE_RESOURCE_ID] = resource_id.map_or(0, |id| id.get().cast_signed());
        slot[STYLE_CHANGING_CONFIGURATIONS] = changes;
        slot[STYLE_DENSITY] = density;
        true
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the number of populated slots.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len() - 1
    }

    /// Returns the slot number of the `at`-th populated slot.
    #[must_use]
    pub fn index(&self, at: usize) -> Option<usize> {
        self.indices
            .get(at + 1)
            .and_then(|slot| usize::try_from(*slot).ok())
    }

    /// Returns the raw slot words, [`STYLE_NUM_ENTRIES`] per slot.
    #[must_use]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Returns the raw compact index: the count, then the populated slots.
    #[must_use]
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    /// Returns `true` if slot `index` is populated.
    #[must_use]
    pub fn has_value(&self, index: usize) -> bool {
        self.peek(index).is_some()
    }

    /// Returns the type of slot `index`, or `None` if it is not populated.
    #[must_use]
    pub fn peek(&self, index: usize) -> Option<ValueType> {
        match ValueType::from_raw(self.word(index, STYLE_TYPE)?)? {
            ValueType::Null => None,
            ty => Some(ty),
        }
    }

    /// Returns the string in slot `index`.
    #[must_use]
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.strings.get(index)?.as_deref()
    }

    /// Returns the boolean in slot `index`, or `default`.
    #[must_use]
    pub fn get_boolean(&self, index: usize, default: bool) -> bool {
        match self.peek(index) {
            Some(ValueType::IntBoolean | ValueType::IntDec) => {
                self.word(index, STYLE_DATA).is_some_and(|data| data != 0)
            }
            _ => default,
        }
    }

    /// Returns the integer in slot `index`, or `default`.
    #[must_use]
    pub fn get_int(&self, index: usize, default: i32) -> i32 {
        match self.peek(index) {
            Some(ValueType::IntDec | ValueType::IntBoolean | ValueType::IntColorArgb8) => {
                self.word(index, STYLE_DATA).unwrap_or(default)
            }
            _ => default,
        }
    }

    /// Returns the color in slot `index`, or `default`.
    #[must_use]
    pub fn get_color(&self, index: usize, default: u32) -> u32 {
        match self.peek(index) {
            Some(ValueType::IntColorArgb8 | ValueType::IntDec) => self
                .word(index, STYLE_DATA)
                .map_or(default, i32::cast_unsigned),
            _ => default,
        }
    }

    /// Returns the float in slot `index`, or `default`.
    #[must_use]
    pub fn get_float(&self, index: usize, default: f32) -> f32 {
        match self.peek(index) {
            Some(ValueType::Float) => self
                .word(index, STYLE_DATA)
                .map_or(default, |bits| f32::from_bits(bits.cast_unsigned())),
            Some(ValueType::IntDec) => self.word(index, STYLE_DATA).map_or(default, |v| v as f32),
            _ => default,
        }
    }

    /// Returns the dimension in slot `index` in pixels at the display
    /// density, or `default`.
    #[must_use]
    pub fn get_dimension(&self, index: usize, default: f32) -> f32 {
        if self.peek(index) != Some(ValueType::Dimension) {
            return default;
        }
        let Some(complex) = self.word(index, STYLE_DATA).map(i32::cast_unsigned) else {
            return default;
        };
        complex_unit(complex).map_or(default, |unit| {
            unit.to_px(complex_to_float(complex), self.density)
        })
    }

    /// Returns the resource id behind slot `index`, if a reference was
    /// followed to get it.
    #[must_use]
    pub fn get_resource_id(&self, index: usize) -> Option<ResourceId> {
        if !self.has_value(index) {
            return None;
        }
        let raw = self.word(index, STYLE_RESOURCE_ID)?.cast_unsigned();
        (raw != 0).then(|| ResourceId::new(raw))
    }

    /// Returns the position description of the attribute set.
    #[must_use]
    pub fn position_description(&self) -> &str {
        &self.position
    }

    fn word(&self, index: usize, offset: usize) -> Option<i32> {
        self.data.get(index * STYLE_NUM_ENTRIES + offset).copied()
    }
}

/// What a slot ends up holding after dereferencing.
enum Packed {
    Literal(Literal),
    Reference(ResourceId),
    Attribute(ResourceId),
}

fn known_id<L: ResourceLoader + ?Sized>(loader: &L, name: &ResName) -> Result<ResourceId, ResolveError> {
    loader
        .resource_id(name)
        .ok_or_else(|| ResolveError::UnknownResource(name.clone()))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "slot counts are far below i32::MAX"
)]
fn slot_number(index: usize) -> i32 {
    index as i32
}
