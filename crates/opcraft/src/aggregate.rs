//! Aggregate type description for one instruction: a word-sized storage
//! overlaid with one member per field, handed to decode handlers.

use crate::{
    bits::BitString,
    field::{ArgType, PlacedField},
    layout::Layout,
};

/// Name of the member that exposes the whole instruction word.
pub const WHOLE_WORD: &str = "instruction";

/// A member of an [Aggregate].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateField {
    /// Member name; padding members use their synthetic `_dontcare<N>` name.
    pub name: String,
    pub offset: u32,
    pub width: u32,
    pub literal: Option<BitString>,
    pub arg_type: ArgType,
    pub padding: bool,
}

impl From<&PlacedField> for AggregateField {
    fn from(field: &PlacedField) -> Self {
        AggregateField {
            name: field.name.to_string(),
            offset: field.offset,
            width: field.width,
            literal: field.literal.clone(),
            arg_type: field.arg_type.clone(),
            padding: field.is_padding(),
        }
    }
}

/// Word storage of one instruction with its fields overlaid, high bits first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    instruction: String,
    fields: Vec<AggregateField>,
}

impl Aggregate {
    pub fn new(instruction: &str, layout: &Layout) -> Self {
        Aggregate {
            instruction: instruction.to_string(),
            fields: layout.fields().iter().map(AggregateField::from).collect(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Every member, padding included, from the highest offset to the lowest.
    pub fn fields(&self) -> &[AggregateField] {
        &self.fields
    }

    /// Members from the lowest offset to the highest, the order C bit-fields
    /// are allocated in on little-endian targets.
    pub fn fields_lsb_first(&self) -> impl Iterator<Item = &AggregateField> {
        self.fields.iter().rev()
    }

    /// Members that get an accessor: everything except padding.
    pub fn accessors(&self) -> impl Iterator<Item = &AggregateField> {
        self.fields.iter().filter(|field| !field.padding)
    }
}
