//! # opcraft
//!
//! Compiles a declarative description of a 64-bit instruction set into
//! decoder building blocks.
//!
//! Each instruction is an ordered list of fields, highest bits first: literal
//! bit patterns that identify the instruction, free fields, and fields pinned
//! to an explicit offset. Compiling an instruction tiles its fields over the
//! whole word (gaps become don't-care padding) and derives a mask/match pair.
//! Emitting an [isa::InstructionSet] produces the constants, one aggregate
//! type per instruction, handler declarations and a dispatch routine that
//! picks the first instruction, in definition order, whose pair accepts a
//! word.
//!
//! ## Example
//!
//! ```
//! use opcraft::emit::{Backend, CppBackend};
//! use opcraft::field::{FieldRecord, RawField};
//! use opcraft::isa::InstructionSet;
//!
//! let set = InstructionSet::compile([
//!     ("VMOV", vec![
//!         RawField::literal("op1", "00111"),
//!         RawField::width("dest", 6),
//!         RawField::structured("src", FieldRecord::default().with_count(6).with_offset(20)),
//!     ]),
//!     ("SPEC", vec![RawField::literal("op1", "11111"), RawField::width("category", 3)]),
//! ])
//! .unwrap();
//!
//! let spec = set.get("SPEC").unwrap();
//! let word = spec.layout().assemble([("category", 3)]).unwrap();
//! assert_eq!(set.dispatch_table().lookup(word).unwrap().name, "SPEC");
//!
//! let header = CppBackend::default().render(&set);
//! assert!(header.contains("if ((instr & SPEC_MASK) == SPEC_MATCH) {"));
//! ```

pub mod aggregate;
pub mod bits;
pub mod dispatch;
pub mod emit;
pub mod errors;
pub mod field;
pub mod isa;
pub mod layout;
pub mod pattern;
#[cfg(feature = "serde")]
pub mod serde;
