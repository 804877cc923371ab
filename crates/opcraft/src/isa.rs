//! Instruction set: every compiled instruction, in definition order.
//!
//! Definition order is dispatch priority, so instructions are kept in a
//! `Vec` end to end and never re-keyed by name.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::{
    aggregate::{Aggregate, WHOLE_WORD},
    dispatch::DispatchTable,
    emit::{CPP_KEYWORDS, type_name},
    errors::CompileError,
    field::{DONT_CARE_PREFIX, RawField},
    layout::Layout,
    pattern::Pattern,
};

/// One compiled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDef {
    name: String,
    layout: Layout,
    pattern: Pattern,
}

impl InstructionDef {
    /// Compiles a single instruction in isolation.
    pub fn compile(name: impl Into<String>, fields: &[RawField]) -> Result<Self, CompileError> {
        let name = name.into();
        check_identifier(&name)?;
        for field in fields {
            if let Some(field_name) = field.name.as_deref() {
                check_field_name(field_name)?;
            }
        }

        let layout = Layout::compile(&name, fields)?;
        let pattern = Pattern::encode(&layout);
        debug!(
            "compiled {name}: {} field(s), pattern {}",
            layout.fields().len(),
            pattern.doc()
        );

        Ok(InstructionDef {
            name,
            layout,
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn aggregate(&self) -> Aggregate {
        Aggregate::new(&self.name, &self.layout)
    }
}

/// Compiled instructions in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSet {
    instructions: Vec<InstructionDef>,
}

impl InstructionSet {
    /// Compiles every definition in order. Stops at the first failing
    /// instruction. Overlapping encodings are reported through `log::warn!`.
    pub fn compile<I, S>(definitions: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (S, Vec<RawField>)>,
        S: Into<String>,
    {
        let mut instructions = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        // Generated Rust type name -> instruction that claimed it.
        let mut type_names: HashMap<String, String> = HashMap::new();

        for (name, fields) in definitions {
            let instruction = InstructionDef::compile(name, &fields)?;
            if !seen.insert(instruction.name.to_lowercase()) {
                return Err(CompileError::DuplicateInstruction(instruction.name));
            }

            let generated = type_name(&instruction.name);
            if let Some(first) = type_names.get(&generated) {
                return Err(CompileError::NameCollision {
                    first: first.clone(),
                    second: instruction.name,
                    generated,
                });
            }
            type_names.insert(generated, instruction.name.clone());

            instructions.push(instruction);
        }

        let set = InstructionSet { instructions };
        for ambiguity in set.dispatch_table().ambiguities() {
            warn!("{ambiguity}");
        }

        Ok(set)
    }

    pub fn instructions(&self) -> &[InstructionDef] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionDef> {
        self.instructions.iter()
    }

    pub fn get(&self, name: &str) -> Option<&InstructionDef> {
        self.instructions.iter().find(|instruction| instruction.name == name)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn dispatch_table(&self) -> DispatchTable {
        DispatchTable::from(self)
    }
}

impl<'a> IntoIterator for &'a InstructionSet {
    type Item = &'a InstructionDef;
    type IntoIter = std::slice::Iter<'a, InstructionDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(name: &str) -> Result<(), CompileError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(CompileError::InvalidIdentifier(name.to_string()))
    }
}

// Field names share a namespace with padding members and the whole-word member,
// and are emitted unchanged as C++ bit-field members.
fn check_field_name(name: &str) -> Result<(), CompileError> {
    check_identifier(name)?;
    if name == WHOLE_WORD || name.starts_with(DONT_CARE_PREFIX) || CPP_KEYWORDS.contains(&name) {
        return Err(CompileError::InvalidIdentifier(name.to_string()));
    }

    Ok(())
}
