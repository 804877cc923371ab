//! Rust backend: `u64` constants, accessor newtypes, a handler trait and a
//! dispatch function generic over it.

use super::{Backend, Formatter, handler_name, mask_name, match_name, type_name};
use crate::{
    aggregate::Aggregate,
    bits,
    isa::{InstructionDef, InstructionSet},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustConfig {
    pub dispatch_fn: String,
    /// Trait with one decode method per instruction.
    pub handlers_trait: String,
}

impl Default for RustConfig {
    fn default() -> Self {
        RustConfig {
            dispatch_fn: "decode_instruction".to_string(),
            handlers_trait: "Handlers".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RustBackend {
    pub config: RustConfig,
}

impl RustBackend {
    pub fn new(config: RustConfig) -> Self {
        RustBackend { config }
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

// These cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

fn method_name(field: &str) -> String {
    if KEYWORDS.contains(&field) {
        format!("r#{field}")
    } else if PATH_KEYWORDS.contains(&field) {
        format!("{field}_")
    } else {
        field.to_string()
    }
}

fn const_name(instruction: &str) -> String {
    instruction.to_uppercase()
}

impl Backend for RustBackend {
    fn preamble(&self, fmt: &mut Formatter) {
        fmt.line("// Generated by opcraft. Do not edit.");
        fmt.blank();
    }

    fn constants(&self, fmt: &mut Formatter, instruction: &InstructionDef) {
        let name = const_name(instruction.name());
        let pattern = instruction.pattern();

        fmt.line(format!("/// `{}`", pattern.doc()));
        fmt.line(format!(
            "pub const {}: u64 = 0b{};",
            mask_name(&name),
            pattern.mask_string()
        ));
        fmt.line(format!(
            "pub const {}: u64 = 0b{};",
            match_name(&name),
            pattern.match_string()
        ));
    }

    fn aggregate(&self, fmt: &mut Formatter, aggregate: &Aggregate) {
        let type_name = type_name(aggregate.instruction());

        fmt.line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
        fmt.line("#[repr(transparent)]");
        fmt.line(format!("pub struct {type_name}(pub u64);"));
        fmt.blank();

        if aggregate
            .accessors()
            .any(|field| field.name.chars().any(|c| c.is_ascii_uppercase()))
        {
            fmt.line("#[allow(non_snake_case)]");
        }
        fmt.indent_with(format!("impl {type_name} {{"), "}", |fmt| {
            for (i, field) in aggregate.accessors().enumerate() {
                if i > 0 {
                    fmt.blank();
                }

                let range = format!("Bits {}..{}", field.offset, field.offset + field.width);
                match &field.literal {
                    Some(literal) => fmt.line(format!("/// {range}, always `0b{literal}`.")),
                    None => fmt.line(format!("/// {range} (`{}`).", field.arg_type)),
                }
                fmt.indent_with(
                    format!("pub const fn {}(self) -> u64 {{", method_name(&field.name)),
                    "}",
                    |fmt| {
                        fmt.line(format!(
                            "(self.0 >> {}) & {:#x}",
                            field.offset,
                            bits::field_mask(field.width)
                        ))
                    },
                );
            }
        });
    }

    fn handler_declarations(&self, fmt: &mut Formatter, set: &InstructionSet) {
        fmt.indent_with(
            format!("pub trait {} {{", self.config.handlers_trait),
            "}",
            |fmt| {
                fmt.line("type Output;");
                for instruction in set {
                    fmt.blank();
                    fmt.line(format!(
                        "fn {}(&mut self, op: {}) -> Self::Output;",
                        handler_name(instruction.name()),
                        type_name(instruction.name())
                    ));
                }
            },
        );
    }

    fn dispatch(&self, fmt: &mut Formatter, set: &InstructionSet) {
        let RustConfig {
            dispatch_fn,
            handlers_trait,
        } = &self.config;

        fmt.line("/// Calls the handler of the first instruction whose encoding accepts `instr`.");
        fmt.indent_with(
            format!(
                "pub fn {dispatch_fn}<H: {handlers_trait} + ?Sized>(handlers: &mut H, instr: u64) -> Option<H::Output> {{"
            ),
            "}",
            |fmt| {
                if set.is_empty() {
                    fmt.line("let _ = (handlers, instr);");
                }
                for instruction in set {
                    let name = const_name(instruction.name());
                    fmt.indent_with(
                        format!("if instr & {} == {} {{", mask_name(&name), match_name(&name)),
                        "}",
                        |fmt| {
                            fmt.line(format!(
                                "return Some(handlers.{}({}(instr)));",
                                handler_name(instruction.name()),
                                type_name(instruction.name())
                            ))
                        },
                    );
                }
                fmt.line("None");
            },
        );
    }
}
