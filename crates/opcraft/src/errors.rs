//! Error types for layout compilation, instruction set validation and field access.

use thiserror::Error;

/// Errors produced when compiling one instruction's fields into a [crate::layout::Layout].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An explicit offset would place the field over bits that are already assigned.
    #[error(
        "{instruction}: field `{field}` at offset {offset} (width {width}) ends at bit {end}, above current offset {current}"
    )]
    OffsetOverflow {
        instruction: String,
        field: String,
        offset: u32,
        width: u32,
        end: u64,
        current: u32,
    },
    /// The fields need more bits than the instruction word has.
    #[error("{instruction}: definition does not fit in 64 bits, field `{field}` is {surplus} bit(s) too wide")]
    DoesNotFitWordSize {
        instruction: String,
        field: String,
        surplus: u32,
    },
    /// A literal contains something other than `0`/`1`, or is empty.
    #[error("{instruction}: field `{field}` has invalid bit pattern {literal:?}")]
    InvalidLiteral {
        instruction: String,
        field: String,
        literal: String,
    },
    /// Both `count` and `match` were given and disagree.
    #[error("{instruction}: field `{field}` has count {count} but a {literal_width}-bit pattern")]
    LiteralWidthMismatch {
        instruction: String,
        field: String,
        count: u32,
        literal_width: u32,
    },
    /// A structured field has neither `count` nor `match`.
    #[error("{instruction}: field `{field}` has no width")]
    MissingWidth { instruction: String, field: String },
    /// A field is zero bits wide.
    #[error("{instruction}: field `{field}` has zero width")]
    ZeroWidth { instruction: String, field: String },
    /// Two named fields of one instruction share a name.
    #[error("{instruction}: field `{field}` is defined more than once")]
    DuplicateField { instruction: String, field: String },
}

impl LayoutError {
    /// Name of the instruction that failed to compile.
    pub fn instruction(&self) -> &str {
        match self {
            LayoutError::OffsetOverflow { instruction, .. }
            | LayoutError::DoesNotFitWordSize { instruction, .. }
            | LayoutError::InvalidLiteral { instruction, .. }
            | LayoutError::LiteralWidthMismatch { instruction, .. }
            | LayoutError::MissingWidth { instruction, .. }
            | LayoutError::ZeroWidth { instruction, .. }
            | LayoutError::DuplicateField { instruction, .. } => instruction,
        }
    }
}

/// Errors produced when compiling a whole [crate::isa::InstructionSet].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Two instructions share a name (compared case-insensitively, since
    /// generated handler names are lower-cased).
    #[error("instruction `{0}` is defined more than once")]
    DuplicateInstruction(String),
    /// An instruction or field name cannot be used as a generated identifier.
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),
    /// Two distinct instruction names map to the same generated identifier.
    #[error("instructions `{first}` and `{second}` would both generate `{generated}`")]
    NameCollision {
        first: String,
        second: String,
        generated: String,
    },
}

/// Errors produced when reading or writing named fields of a raw word.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    /// No named field with this name exists in the layout.
    #[error("no field named `{0}`")]
    UnknownField(String),
    /// The field is a literal; its bits are fixed by the encoding.
    #[error("field `{0}` is fixed by the encoding and cannot be assigned")]
    FixedField(String),
}
