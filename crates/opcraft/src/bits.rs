//! Bit-string literals and word-level bit helpers.
//!
//! Word bits are numbered LSB-first: bit 0 is the least significant bit of the
//! instruction word. Bit strings are written MSB-first, the way they appear in
//! a definition file.

use std::fmt;

/// Width of one instruction word in bits.
pub const WORD_BITS: u32 = 64;

/// A fixed bit pattern made only of `0` and `1`, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString(String);

impl BitString {
    /// Parses a literal such as `"0101"` or `"0b0101"`.
    ///
    /// Returns `None` for an empty pattern or any character other than `0`/`1`.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix("0b").unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b == b'0' || b == b'1') {
            return None;
        }

        Some(BitString(digits.to_string()))
    }

    /// Number of bits in the pattern.
    pub fn width(&self) -> u32 {
        self.0.len() as u32
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the pattern. Only the low 64 bits are kept.
    pub fn value(&self) -> u64 {
        self.0
            .bytes()
            .fold(0u64, |acc, b| (acc << 1) | u64::from(b - b'0'))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mask with the low `width` bits set.
pub fn field_mask(width: u32) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Reads `width` bits of `word` starting at bit `offset`.
pub fn extract(word: u64, offset: u32, width: u32) -> u64 {
    word.checked_shr(offset).unwrap_or(0) & field_mask(width)
}

/// Returns `word` with the `width` bits at `offset` replaced by the low bits of `value`.
pub fn insert(word: u64, offset: u32, width: u32, value: u64) -> u64 {
    if width == 0 || offset >= WORD_BITS {
        return word;
    }

    let mask = field_mask(width) << offset;
    (word & !mask) | ((value << offset) & mask)
}
