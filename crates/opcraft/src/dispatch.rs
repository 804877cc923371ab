//! First-match-wins dispatch over mask/match entries.

use std::fmt;

use crate::{isa::InstructionSet, pattern::Pattern};

/// Mask/match pair of one instruction, as tested by the dispatch routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntry {
    pub name: String,
    pub mask: u64,
    /// The match constant.
    pub value: u64,
}

impl DispatchEntry {
    pub fn matches(&self, word: u64) -> bool {
        word & self.mask == self.value
    }

    fn pattern_overlaps(&self, other: &DispatchEntry) -> bool {
        (self.value ^ other.value) & self.mask & other.mask == 0
    }
}

/// Two entries that accept a common word. The earlier one always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub winner: String,
    pub shadowed: String,
    /// A word accepted by both entries.
    pub witness: u64,
    /// Every word of `shadowed` is taken by `winner`.
    pub unreachable: bool,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unreachable {
            write!(
                f,
                "{} is unreachable: every encoding is taken by {} (e.g. {:#018x})",
                self.shadowed, self.winner, self.witness
            )
        } else {
            write!(
                f,
                "{} overlaps {}, which takes precedence (e.g. {:#018x})",
                self.shadowed, self.winner, self.witness
            )
        }
    }
}

/// Dispatch entries in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTable {
    entries: Vec<DispatchEntry>,
}

impl DispatchTable {
    pub fn entries(&self) -> &[DispatchEntry] {
        &self.entries
    }

    /// The first entry that accepts `word`, or `None` when nothing matches.
    pub fn lookup(&self, word: u64) -> Option<&DispatchEntry> {
        self.entries.iter().find(|entry| entry.matches(word))
    }

    /// Index of the first entry that accepts `word`.
    pub fn position(&self, word: u64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(word))
    }

    /// Every pair of entries whose encodings overlap, earlier entry first.
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut found = Vec::new();

        for (i, winner) in self.entries.iter().enumerate() {
            for shadowed in &self.entries[i + 1..] {
                if !winner.pattern_overlaps(shadowed) {
                    continue;
                }

                found.push(Ambiguity {
                    winner: winner.name.clone(),
                    shadowed: shadowed.name.clone(),
                    witness: winner.value | shadowed.value,
                    unreachable: winner.mask & !shadowed.mask == 0,
                });
            }
        }

        found
    }
}

impl From<&InstructionSet> for DispatchTable {
    fn from(set: &InstructionSet) -> Self {
        DispatchTable {
            entries: set
                .iter()
                .map(|instruction| entry(instruction.name(), instruction.pattern()))
                .collect(),
        }
    }
}

fn entry(name: &str, pattern: &Pattern) -> DispatchEntry {
    DispatchEntry {
        name: name.to_string(),
        mask: pattern.mask(),
        value: pattern.value(),
    }
}
