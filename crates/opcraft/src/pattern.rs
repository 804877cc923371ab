//! Mask/match encoding of a compiled [Layout].

use std::iter;

use crate::{bits::WORD_BITS, layout::Layout};

/// Bit pattern that identifies an instruction.
///
/// `doc` is the human-readable form, one character per bit from high to low:
/// `0`/`1` for literal bits, `x` for free field bits and `?` for padding.
/// `mask` has a bit set wherever `doc` has a `0` or `1`, and `value` carries
/// those literal bits; a word belongs to the instruction when
/// `word & mask == value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    doc: String,
    mask: u64,
    value: u64,
}

impl Pattern {
    pub fn encode(layout: &Layout) -> Self {
        let mut doc = String::with_capacity(WORD_BITS as usize);
        let mut mask = 0u64;
        let mut value = 0u64;

        for field in layout.fields() {
            match &field.literal {
                Some(literal) => {
                    doc.push_str(literal.as_str());
                    mask |= field.mask();
                    value |= literal.value() << field.offset;
                }
                None => {
                    let c = if field.is_padding() { '?' } else { 'x' };
                    doc.extend(iter::repeat_n(c, field.width as usize));
                }
            }
        }

        Pattern { doc, mask, value }
    }

    /// Per-bit description, e.g. `10xxxx??`.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// The match constant.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// `mask` as a 64-character binary string.
    pub fn mask_string(&self) -> String {
        format!("{:064b}", self.mask)
    }

    /// `value` as a 64-character binary string.
    pub fn match_string(&self) -> String {
        format!("{:064b}", self.value)
    }

    pub fn matches(&self, word: u64) -> bool {
        word & self.mask == self.value
    }

    /// Whether some word satisfies both patterns.
    pub fn overlaps(&self, other: &Pattern) -> bool {
        (self.value ^ other.value) & self.mask & other.mask == 0
    }

    /// Whether every word matching `other` also matches `self`.
    pub fn covers(&self, other: &Pattern) -> bool {
        self.mask & !other.mask == 0 && self.overlaps(other)
    }
}

impl From<&Layout> for Pattern {
    fn from(layout: &Layout) -> Self {
        Pattern::encode(layout)
    }
}
