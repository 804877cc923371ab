//! Layout: the compiled, fully tiled field list of one instruction.
//!
//! Fields are packed greedily from the top of the word down. A field with an
//! explicit offset may skip bits; the skipped range becomes a don't-care field,
//! as does whatever is left below the last field. The result always covers
//! bits `[0, 64)` exactly once.

use std::collections::HashSet;

use log::trace;

use crate::{
    bits::{self, BitString, WORD_BITS},
    errors::{FieldAccessError, LayoutError},
    field::{ArgType, FieldName, PlacedField, RawField, RawFieldSpec},
};

/// Fields of one instruction, ordered from the highest offset to the lowest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    fields: Vec<PlacedField>,
}

/// A raw field with its shorthand resolved.
struct NormalizedField {
    name: Option<String>,
    width: u32,
    literal: Option<BitString>,
    offset: Option<u32>,
    arg_type: ArgType,
}

fn normalize(instruction: &str, raw: &RawField) -> Result<NormalizedField, LayoutError> {
    let field = raw.display_name();
    let parse_literal = |text: &str| {
        BitString::parse(text).ok_or_else(|| LayoutError::InvalidLiteral {
            instruction: instruction.to_string(),
            field: field.to_string(),
            literal: text.to_string(),
        })
    };

    let (width, literal, offset, arg_type) = match &raw.spec {
        RawFieldSpec::LiteralBits(text) => {
            let literal = parse_literal(text)?;
            (literal.width(), Some(literal), None, None)
        }
        RawFieldSpec::PlainWidth(width) => (*width, None, None, None),
        RawFieldSpec::Structured(record) => {
            let literal = record.literal.as_deref().map(parse_literal).transpose()?;
            let width = match (record.count, &literal) {
                (Some(count), Some(literal)) if count != literal.width() => {
                    return Err(LayoutError::LiteralWidthMismatch {
                        instruction: instruction.to_string(),
                        field: field.to_string(),
                        count,
                        literal_width: literal.width(),
                    });
                }
                (Some(count), _) => count,
                (None, Some(literal)) => literal.width(),
                (None, None) => {
                    return Err(LayoutError::MissingWidth {
                        instruction: instruction.to_string(),
                        field: field.to_string(),
                    });
                }
            };
            (width, literal, record.offset, record.arg_type.clone())
        }
    };

    if width == 0 {
        return Err(LayoutError::ZeroWidth {
            instruction: instruction.to_string(),
            field: field.to_string(),
        });
    }

    Ok(NormalizedField {
        name: raw.name.clone(),
        width,
        literal,
        offset,
        arg_type: arg_type.map_or_else(|| ArgType::immediate(width), ArgType::new),
    })
}

impl Layout {
    /// Compiles the raw fields of `instruction`, taken in high-to-low bit order.
    pub fn compile(instruction: &str, raw_fields: &[RawField]) -> Result<Self, LayoutError> {
        let mut fields: Vec<PlacedField> = Vec::with_capacity(raw_fields.len() + 1);
        let mut names: HashSet<&str> = HashSet::with_capacity(raw_fields.len());
        // Bits not yet assigned, counted from the top of the word.
        let mut remaining = WORD_BITS;
        let mut padding = 0u32;

        for raw in raw_fields {
            let field = normalize(instruction, raw)?;

            if let Some(name) = raw.name.as_deref() {
                if !names.insert(name) {
                    return Err(LayoutError::DuplicateField {
                        instruction: instruction.to_string(),
                        field: name.to_string(),
                    });
                }
            }

            if let Some(offset) = field.offset {
                let end = u64::from(offset) + u64::from(field.width);
                if end > u64::from(remaining) {
                    return Err(LayoutError::OffsetOverflow {
                        instruction: instruction.to_string(),
                        field: raw.display_name().to_string(),
                        offset,
                        width: field.width,
                        end,
                        current: remaining,
                    });
                }

                let end = end as u32;
                let gap = remaining - end;
                if gap > 0 {
                    trace!("{instruction}: {gap} don't-care bit(s) at [{end}, {remaining})");
                    fields.push(PlacedField::dont_care(padding, end, gap));
                    padding += 1;
                    remaining = end;
                }
            }

            if field.width > remaining {
                return Err(LayoutError::DoesNotFitWordSize {
                    instruction: instruction.to_string(),
                    field: raw.display_name().to_string(),
                    surplus: field.width - remaining,
                });
            }

            remaining -= field.width;

            let name = match field.name {
                Some(name) => FieldName::Named(name),
                None => {
                    padding += 1;
                    FieldName::DontCare(padding - 1)
                }
            };
            trace!(
                "{instruction}: placed `{name}` at [{remaining}, {})",
                remaining + field.width
            );

            fields.push(PlacedField {
                name,
                offset: remaining,
                width: field.width,
                literal: field.literal,
                arg_type: field.arg_type,
            });
        }

        if remaining > 0 {
            trace!("{instruction}: {remaining} trailing don't-care bit(s)");
            fields.push(PlacedField::dont_care(padding, 0, remaining));
        }

        let layout = Layout { fields };
        debug_assert_eq!(layout.total_width(), WORD_BITS);

        Ok(layout)
    }

    /// All fields, padding included, from the highest offset to the lowest.
    pub fn fields(&self) -> &[PlacedField] {
        &self.fields
    }

    /// Fields that carry a name from the definition.
    pub fn named_fields(&self) -> impl Iterator<Item = &PlacedField> {
        self.fields.iter().filter(|field| !field.is_padding())
    }

    /// Looks up a named field.
    pub fn field(&self, name: &str) -> Option<&PlacedField> {
        self.named_fields()
            .find(|field| matches!(&field.name, FieldName::Named(n) if n == name))
    }

    /// Sum of all field widths.
    pub fn total_width(&self) -> u32 {
        self.fields.iter().map(|field| field.width).sum()
    }

    /// Reads the named field out of `word`.
    pub fn extract(&self, word: u64, name: &str) -> Result<u64, FieldAccessError> {
        let field = self
            .field(name)
            .ok_or_else(|| FieldAccessError::UnknownField(name.to_string()))?;

        Ok(bits::extract(word, field.offset, field.width))
    }

    /// Builds a word with every literal field set to its pattern and the given
    /// named fields set to their values. Unlisted fields and padding are zero;
    /// values wider than their field are truncated.
    pub fn assemble<'a>(
        &self,
        values: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Result<u64, FieldAccessError> {
        let mut word = self
            .fields
            .iter()
            .filter_map(|field| field.literal.as_ref().map(|literal| (field, literal)))
            .fold(0u64, |word, (field, literal)| {
                bits::insert(word, field.offset, field.width, literal.value())
            });

        for (name, value) in values {
            let field = self
                .field(name)
                .ok_or_else(|| FieldAccessError::UnknownField(name.to_string()))?;
            if field.literal.is_some() {
                return Err(FieldAccessError::FixedField(name.to_string()));
            }

            word = bits::insert(word, field.offset, field.width, value);
        }

        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use crate::field::FieldRecord;

    use super::*;

    fn offsets(layout: &Layout) -> Vec<(String, u32, u32)> {
        layout
            .fields()
            .iter()
            .map(|field| (field.name.to_string(), field.offset, field.width))
            .collect()
    }

    #[test]
    fn test_contiguous_fields() {
        let layout = Layout::compile(
            "ALU",
            &[
                RawField::literal("op", "0b10"),
                RawField::width("a", 30),
                RawField::literal("sub", "0b01"),
                RawField::width("b", 30),
            ],
        )
        .unwrap();

        assert_eq!(
            offsets(&layout),
            vec![
                ("op".to_string(), 62, 2),
                ("a".to_string(), 32, 30),
                ("sub".to_string(), 30, 2),
                ("b".to_string(), 0, 30),
            ]
        );
        assert_eq!(layout.total_width(), 64);
    }

    #[test]
    fn test_explicit_offset_inserts_gap() {
        let layout = Layout::compile(
            "LD",
            &[
                RawField::width("head", 44),
                RawField::structured("reg", FieldRecord::default().with_count(4).with_offset(10)),
            ],
        )
        .unwrap();

        assert_eq!(
            offsets(&layout),
            vec![
                ("head".to_string(), 20, 44),
                ("_dontcare0".to_string(), 14, 6),
                ("reg".to_string(), 10, 4),
                ("_dontcare1".to_string(), 0, 10),
            ]
        );
    }

    #[test]
    fn test_explicit_offset_without_gap() {
        let layout = Layout::compile(
            "NOP",
            &[RawField::structured("all", FieldRecord::default().with_count(64).with_offset(0))],
        )
        .unwrap();

        assert_eq!(offsets(&layout), vec![("all".to_string(), 0, 64)]);
    }

    #[test]
    fn test_trailing_gap() {
        let layout = Layout::compile("X", &[RawField::literal("op", "111")]).unwrap();

        assert_eq!(
            offsets(&layout),
            vec![("op".to_string(), 61, 3), ("_dontcare0".to_string(), 0, 61)]
        );
        assert!(layout.fields()[1].literal.is_none());
    }

    #[test]
    fn test_empty_definition_is_all_padding() {
        let layout = Layout::compile("EMPTY", &[]).unwrap();
        assert_eq!(offsets(&layout), vec![("_dontcare0".to_string(), 0, 64)]);
    }

    #[test]
    fn test_unnamed_members_are_numbered_with_gaps() {
        let layout = Layout::compile(
            "P",
            &[
                RawField::literal("_", "01"),
                RawField::structured("x", FieldRecord::default().with_count(2).with_offset(50)),
                RawField::width("_", 2),
            ],
        )
        .unwrap();

        let names: Vec<String> = layout.fields().iter().map(|f| f.name.to_string()).collect();
        assert_eq!(
            names,
            vec!["_dontcare0", "_dontcare1", "x", "_dontcare2", "_dontcare3"]
        );
        assert_eq!(layout.fields()[0].literal.as_ref().unwrap().as_str(), "01");
    }

    #[test]
    fn test_too_wide() {
        let err = Layout::compile(
            "BIG",
            &[RawField::width("a", 33), RawField::width("b", 32)],
        )
        .unwrap_err();

        assert_eq!(
            err,
            LayoutError::DoesNotFitWordSize {
                instruction: "BIG".to_string(),
                field: "b".to_string(),
                surplus: 1,
            }
        );
        assert_eq!(err.instruction(), "BIG");
    }

    #[test]
    fn test_offset_overflow() {
        let err = Layout::compile(
            "OVL",
            &[
                RawField::width("head", 44),
                RawField::structured("reg", FieldRecord::default().with_count(4).with_offset(18)),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            LayoutError::OffsetOverflow {
                instruction: "OVL".to_string(),
                field: "reg".to_string(),
                offset: 18,
                width: 4,
                end: 22,
                current: 20,
            }
        );
    }

    #[test]
    fn test_offset_past_word() {
        let err = Layout::compile(
            "OVL",
            &[RawField::structured("reg", FieldRecord::default().with_count(4).with_offset(u32::MAX))],
        )
        .unwrap_err();

        assert!(matches!(err, LayoutError::OffsetOverflow { .. }));
    }

    #[test]
    fn test_invalid_literal() {
        let err = Layout::compile("BAD", &[RawField::literal("op", "01x")]).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidLiteral { ref literal, .. } if literal == "01x"));
    }

    #[test]
    fn test_literal_width_mismatch() {
        let err = Layout::compile(
            "BAD",
            &[RawField::structured("op", FieldRecord::default().with_count(3).with_literal("10"))],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LayoutError::LiteralWidthMismatch { count: 3, literal_width: 2, .. }
        ));
    }

    #[test]
    fn test_record_width_from_literal() {
        let layout = Layout::compile(
            "R",
            &[RawField::structured("op", FieldRecord::default().with_literal("101").with_arg_type("Opcode"))],
        )
        .unwrap();

        let op = layout.field("op").unwrap();
        assert_eq!(op.width, 3);
        assert_eq!(op.arg_type.as_str(), "Opcode");
    }

    #[test]
    fn test_missing_and_zero_width() {
        let err = Layout::compile("W", &[RawField::structured("f", FieldRecord::default())]).unwrap_err();
        assert!(matches!(err, LayoutError::MissingWidth { .. }));

        let err = Layout::compile("W", &[RawField::width("f", 0)]).unwrap_err();
        assert!(matches!(err, LayoutError::ZeroWidth { .. }));
    }

    #[test]
    fn test_duplicate_field() {
        let err = Layout::compile(
            "D",
            &[RawField::width("a", 4), RawField::width("a", 4)],
        )
        .unwrap_err();

        assert!(matches!(err, LayoutError::DuplicateField { ref field, .. } if field == "a"));
    }

    #[test]
    fn test_default_arg_type() {
        let layout = Layout::compile("A", &[RawField::width("imm", 12)]).unwrap();
        assert_eq!(layout.field("imm").unwrap().arg_type.as_str(), "Imm12");
    }

    #[test]
    fn test_assemble_and_extract() {
        let layout = Layout::compile(
            "SPEC",
            &[
                RawField::literal("op1", "11111"),
                RawField::width("category", 3),
                RawField::width("special", 1),
            ],
        )
        .unwrap();

        let word = layout
            .assemble([("category", 3), ("special", 1)])
            .unwrap();

        assert_eq!(layout.extract(word, "op1").unwrap(), 0b11111);
        assert_eq!(layout.extract(word, "category").unwrap(), 3);
        assert_eq!(layout.extract(word, "special").unwrap(), 1);
        assert_eq!(word, 0b11111_011_1 << 55);
    }

    #[test]
    fn test_assemble_errors() {
        let layout = Layout::compile("A", &[RawField::literal("op", "1"), RawField::width("x", 4)]).unwrap();

        assert_eq!(
            layout.assemble([("y", 1)]).unwrap_err(),
            FieldAccessError::UnknownField("y".to_string())
        );
        assert_eq!(
            layout.assemble([("op", 1)]).unwrap_err(),
            FieldAccessError::FixedField("op".to_string())
        );
        assert_eq!(
            layout.extract(0, "_dontcare0").unwrap_err(),
            FieldAccessError::UnknownField("_dontcare0".to_string())
        );
    }
}
