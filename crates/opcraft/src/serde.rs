//! Deserializable instruction set definition.
//!
//! The expected document is a mapping from instruction name to a body with an
//! ordered `members` list. Each member is a single-entry mapping from field
//! name to one of:
//!
//! - a bit-string literal (`"00111"`),
//! - a width (`6`),
//! - a record with any of `count`, `match`, `offset` and `argtype`.
//!
//! ```text
//! VMOV:
//!   members:
//!     - op1: '00111'
//!     - dest: 6
//!     - src: { count: 6, offset: 20 }
//! ```
//!
//! Document order is dispatch priority, so the top-level mapping is read with
//! its own visitor into a `Vec` rather than through a hash map.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};

use crate::{
    errors::CompileError,
    field::{FieldRecord, RawField, RawFieldSpec},
    isa::InstructionSet,
};

/// Top-level definition: instructions in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsaDef {
    pub instructions: Vec<(String, InstructionBodyDef)>,
}

impl<'de> Deserialize<'de> for IsaDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IsaVisitor;

        impl<'de> Visitor<'de> for IsaVisitor {
            type Value = IsaDef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of instruction names to definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<IsaDef, A::Error> {
                let mut instructions = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, InstructionBodyDef>()? {
                    instructions.push(entry);
                }
                Ok(IsaDef { instructions })
            }
        }

        deserializer.deserialize_map(IsaVisitor)
    }
}

/// Body of one instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstructionBodyDef {
    /// Fields from the highest bits to the lowest.
    pub members: Vec<MemberDef>,
}

/// A `{ name: value }` member. The name `_` marks padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    pub name: String,
    pub value: MemberValueDef,
}

impl<'de> Deserialize<'de> for MemberDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MemberVisitor;

        impl<'de> Visitor<'de> for MemberVisitor {
            type Value = MemberDef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a single-entry mapping from field name to field")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MemberDef, A::Error> {
                let Some((name, value)) = map.next_entry::<String, MemberValueDef>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if let Some(extra) = map.next_key::<String>()? {
                    return Err(de::Error::custom(format!(
                        "member `{name}` has a second key `{extra}`; write one field per list item"
                    )));
                }
                Ok(MemberDef { name, value })
            }
        }

        deserializer.deserialize_map(MemberVisitor)
    }
}

/// Value of a member, in any of its three shorthand forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MemberValueDef {
    Literal(String),
    Width(u32),
    Record(FieldRecordDef),
}

/// Structured member value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRecordDef {
    #[serde(default)]
    pub count: Option<u32>,
    /// Literal bit pattern.
    #[serde(default, rename = "match")]
    pub literal: Option<String>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub argtype: Option<String>,
}

impl From<FieldRecordDef> for FieldRecord {
    fn from(value: FieldRecordDef) -> Self {
        FieldRecord {
            count: value.count,
            literal: value.literal,
            offset: value.offset,
            arg_type: value.argtype,
        }
    }
}

impl From<MemberValueDef> for RawFieldSpec {
    fn from(value: MemberValueDef) -> Self {
        match value {
            MemberValueDef::Literal(bits) => RawFieldSpec::LiteralBits(bits),
            MemberValueDef::Width(width) => RawFieldSpec::PlainWidth(width),
            MemberValueDef::Record(record) => RawFieldSpec::Structured(record.into()),
        }
    }
}

impl From<MemberDef> for RawField {
    fn from(value: MemberDef) -> Self {
        RawField::new(value.name, value.value.into())
    }
}

impl IsaDef {
    /// Converts into the raw field lists [InstructionSet::compile] takes, keeping order.
    pub fn into_raw(self) -> Vec<(String, Vec<RawField>)> {
        self.instructions
            .into_iter()
            .map(|(name, body)| (name, body.members.into_iter().map(Into::into).collect()))
            .collect()
    }
}

impl TryFrom<IsaDef> for InstructionSet {
    type Error = CompileError;

    fn try_from(value: IsaDef) -> Result<Self, Self::Error> {
        InstructionSet::compile(value.into_raw())
    }
}
