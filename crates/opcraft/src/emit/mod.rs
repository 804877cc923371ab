//! Rendering of a compiled [InstructionSet] into decoder source text.
//!
//! A [Backend] renders four sections, always in definition order:
//! mask/match constants, one aggregate type per instruction, handler
//! declarations, and the dispatch routine. The dispatch routine tests each
//! instruction's mask/match pair in turn and calls the first handler whose
//! pair accepts the word.

mod cpp;
mod formatter;
mod rust;

pub(crate) use cpp::KEYWORDS as CPP_KEYWORDS;
pub use cpp::{CppBackend, CppConfig};
pub use formatter::Formatter;
pub use rust::{RustBackend, RustConfig};

use crate::{
    aggregate::Aggregate,
    isa::{InstructionDef, InstructionSet},
};

/// A target language for generated decoders.
pub trait Backend {
    /// Text emitted before everything else.
    fn preamble(&self, _fmt: &mut Formatter) {}

    /// Mask and match constants of one instruction.
    fn constants(&self, fmt: &mut Formatter, instruction: &InstructionDef);

    /// Type exposing the fields of one instruction.
    fn aggregate(&self, fmt: &mut Formatter, aggregate: &Aggregate);

    /// Declarations of the external per-instruction decode handlers.
    fn handler_declarations(&self, fmt: &mut Formatter, set: &InstructionSet);

    /// The dispatch routine.
    fn dispatch(&self, fmt: &mut Formatter, set: &InstructionSet);

    /// Renders the complete artifact.
    fn render(&self, set: &InstructionSet) -> String {
        let mut fmt = Formatter::new();

        self.preamble(&mut fmt);

        for instruction in set {
            self.constants(&mut fmt, instruction);
            fmt.blank();
        }

        for instruction in set {
            self.aggregate(&mut fmt, &instruction.aggregate());
            fmt.blank();
        }

        self.handler_declarations(&mut fmt, set);
        fmt.blank();

        self.dispatch(&mut fmt, set);

        fmt.finish()
    }
}

/// Name of the mask constant of `instruction`.
pub fn mask_name(instruction: &str) -> String {
    format!("{instruction}_MASK")
}

/// Name of the match constant of `instruction`.
pub fn match_name(instruction: &str) -> String {
    format!("{instruction}_MATCH")
}

/// Name of the external decode handler of `instruction`.
pub fn handler_name(instruction: &str) -> String {
    format!("{}_decode", instruction.to_lowercase())
}

/// Name of the Rust accessor type of `instruction`: `load_store` becomes
/// `LoadStoreInstruction`.
///
/// The mapping drops underscores and case, so distinct instruction names can
/// share a type name; [InstructionSet::compile] rejects such pairs.
pub fn type_name(instruction: &str) -> String {
    let mut name: String = instruction
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    name.push_str("Instruction");
    name
}
