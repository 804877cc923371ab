//! C++ header backend: `constexpr` masks, bit-field unions and an `if` chain.

use super::{Backend, Formatter, handler_name, mask_name, match_name};
use crate::{
    aggregate::{Aggregate, WHOLE_WORD},
    isa::{InstructionDef, InstructionSet},
};

/// Names the generated header uses for types and the dispatch routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppConfig {
    /// 64-bit unsigned integer type.
    pub word_type: String,
    /// Return type of handlers and of the dispatch routine.
    pub result_type: String,
    pub dispatch_fn: String,
    /// Expression returned when no instruction matches.
    pub no_match: String,
}

impl Default for CppConfig {
    fn default() -> Self {
        CppConfig {
            word_type: "u64".to_string(),
            result_type: "usse::InstructionResult".to_string(),
            dispatch_fn: "decode_usse_instruction".to_string(),
            no_match: "boost::none".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CppBackend {
    pub config: CppConfig,
}

impl CppBackend {
    pub fn new(config: CppConfig) -> Self {
        CppBackend { config }
    }
}

/// C++ keywords and alternative tokens. Field names become bit-field members
/// verbatim, so these are rejected when an instruction is compiled.
pub(crate) const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

fn union_name(instruction: &str) -> String {
    format!("{}_instruction", instruction.to_lowercase())
}

impl Backend for CppBackend {
    fn constants(&self, fmt: &mut Formatter, instruction: &InstructionDef) {
        let word = &self.config.word_type;
        let pattern = instruction.pattern();

        fmt.line(format!("// {}: {}", instruction.name(), pattern.doc()));
        fmt.line(format!(
            "constexpr const {word} {:20} = 0b{}ULL;",
            mask_name(instruction.name()),
            pattern.mask_string()
        ));
        fmt.line(format!(
            "constexpr const {word} {:20} = 0b{}ULL;",
            match_name(instruction.name()),
            pattern.match_string()
        ));
    }

    fn aggregate(&self, fmt: &mut Formatter, aggregate: &Aggregate) {
        let word = &self.config.word_type;

        fmt.indent_with(
            format!("union {} {{", union_name(aggregate.instruction())),
            "};",
            |fmt| {
                fmt.line(format!("{word} {WHOLE_WORD};"));
                fmt.indent_with("struct {", "};", |fmt| {
                    // Bit-fields are allocated from the least significant bit.
                    for field in aggregate.fields_lsb_first() {
                        match &field.literal {
                            Some(literal) => fmt.line(format!(
                                "{word} {} : {}; // always 0b{literal}",
                                field.name, field.width
                            )),
                            None => fmt.line(format!("{word} {} : {};", field.name, field.width)),
                        }
                    }
                });
            },
        );
    }

    fn handler_declarations(&self, fmt: &mut Formatter, set: &InstructionSet) {
        for instruction in set {
            fmt.line(format!(
                "{} {}({} &op);",
                self.config.result_type,
                handler_name(instruction.name()),
                union_name(instruction.name())
            ));
        }
    }

    fn dispatch(&self, fmt: &mut Formatter, set: &InstructionSet) {
        let CppConfig {
            word_type,
            result_type,
            dispatch_fn,
            no_match,
        } = &self.config;

        fmt.indent_with(
            format!("{result_type} {dispatch_fn}({word_type} instr) {{"),
            "}",
            |fmt| {
                for instruction in set {
                    let name = instruction.name();
                    fmt.indent_with(
                        format!("if ((instr & {}) == {}) {{", mask_name(name), match_name(name)),
                        "}",
                        |fmt| {
                            fmt.line(format!(
                                "return {}(({} &)({word_type} &)instr);",
                                handler_name(name),
                                union_name(name)
                            ))
                        },
                    );
                }
                fmt.line(format!("return {no_match};"));
            },
        );
    }
}
