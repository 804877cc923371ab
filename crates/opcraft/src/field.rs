//! Field model: raw fields as authored in a definition, and placed fields as compiled.

use std::fmt;

use crate::bits::{self, BitString};

/// Member name that marks an unnamed (padding) field in a definition.
pub const PADDING_NAME: &str = "_";

/// Prefix of the synthetic names given to padding fields.
pub const DONT_CARE_PREFIX: &str = "_dontcare";

/// Shape of a single member value in a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFieldSpec {
    /// A fixed bit pattern; the width is the pattern length.
    LiteralBits(String),
    /// A free field of the given width.
    PlainWidth(u32),
    /// A record with any of `count`, `match`, `offset` and `argtype`.
    Structured(FieldRecord),
}

/// Structured member value. All parts are optional; see [crate::layout::Layout::compile]
/// for how they are reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    /// Width in bits.
    pub count: Option<u32>,
    /// Literal bit pattern the field must equal.
    pub literal: Option<String>,
    /// Low bit position the field is pinned to.
    pub offset: Option<u32>,
    /// Decoded representation label.
    pub arg_type: Option<String>,
}

impl FieldRecord {
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_arg_type(mut self, arg_type: impl Into<String>) -> Self {
        self.arg_type = Some(arg_type.into());
        self
    }
}

/// One member of an instruction definition, in authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Field name, or `None` for padding.
    pub name: Option<String>,
    pub spec: RawFieldSpec,
}

impl RawField {
    pub fn new(name: impl Into<String>, spec: RawFieldSpec) -> Self {
        let name = name.into();
        RawField {
            name: (name != PADDING_NAME).then_some(name),
            spec,
        }
    }

    pub fn padding(spec: RawFieldSpec) -> Self {
        RawField { name: None, spec }
    }

    /// Shorthand for a literal member, e.g. `RawField::literal("op", "10110")`.
    pub fn literal(name: impl Into<String>, bits: impl Into<String>) -> Self {
        RawField::new(name, RawFieldSpec::LiteralBits(bits.into()))
    }

    /// Shorthand for a free member of `width` bits.
    pub fn width(name: impl Into<String>, width: u32) -> Self {
        RawField::new(name, RawFieldSpec::PlainWidth(width))
    }

    pub fn structured(name: impl Into<String>, record: FieldRecord) -> Self {
        RawField::new(name, RawFieldSpec::Structured(record))
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(PADDING_NAME)
    }
}

/// Label describing how a field's bits are decoded, e.g. `Imm5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgType(String);

impl ArgType {
    pub fn new(tag: impl Into<String>) -> Self {
        ArgType(tag.into())
    }

    /// Tag synthesized when a definition gives none.
    pub fn immediate(width: u32) -> Self {
        ArgType(format!("Imm{width}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a compiled field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldName {
    Named(String),
    /// Padding, numbered per instruction in high-to-low order.
    DontCare(u32),
}

impl FieldName {
    pub fn is_padding(&self) -> bool {
        matches!(self, FieldName::DontCare(_))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Named(name) => f.write_str(name),
            FieldName::DontCare(index) => write!(f, "{DONT_CARE_PREFIX}{index}"),
        }
    }
}

/// A field at its final position inside the instruction word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedField {
    pub name: FieldName,
    /// Position of the lowest bit, counted from the LSB.
    pub offset: u32,
    pub width: u32,
    pub literal: Option<BitString>,
    pub arg_type: ArgType,
}

impl PlacedField {
    pub(crate) fn dont_care(index: u32, offset: u32, width: u32) -> Self {
        PlacedField {
            name: FieldName::DontCare(index),
            offset,
            width,
            literal: None,
            arg_type: ArgType::immediate(width),
        }
    }

    pub fn is_padding(&self) -> bool {
        self.name.is_padding()
    }

    /// One past the highest bit of the field.
    pub fn end(&self) -> u32 {
        self.offset + self.width
    }

    /// Mask covering the field's bits within the word.
    pub fn mask(&self) -> u64 {
        bits::field_mask(self.width) << self.offset
    }
}
