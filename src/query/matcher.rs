//! Compiled bit-mask matcher.
//!
//! A fixed-length pattern over `{0,1,.}` compiles into one 256-entry
//! acceptance set per byte position (packed 4x64 bits, like a small bitset).
//! Matching is a straight per-byte table lookup from the start of a buffer:
//! no anchoring elsewhere, no backtracking.

use crate::error::{PatternError, Result};

/// Acceptance bitmap for one byte position.
type ByteClass = [u64; 4];

#[inline]
fn class_contains(class: &ByteClass, byte: u8) -> bool {
    class[(byte >> 6) as usize] >> (byte & 63) & 1 != 0
}

/// Outcome of matching a buffer against a compiled pattern.
///
/// Returned by value instead of being stored on the matcher, so one compiled
/// pattern can verify many candidates without shared mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the full pattern matched.
    pub is_match: bool,
    /// Number of byte positions matched before the first rejection (equals
    /// the pattern length on success).
    pub matched_len: usize,
}

/// A pattern over `{0,1,.}` compiled to per-position byte acceptance sets.
pub struct BitPatternMatcher {
    classes: Vec<ByteClass>,
}

impl BitPatternMatcher {
    /// Compile `chars`, whose length must be a positive multiple of 8.
    pub fn compile(chars: &[u8]) -> Result<Self> {
        if chars.is_empty() {
            return Err(PatternError::Empty.into());
        }
        if chars.len() % 8 != 0 {
            return Err(PatternError::NotByteAligned { bits: chars.len() }.into());
        }

        let mut classes = Vec::with_capacity(chars.len() / 8);
        for (byte_idx, group) in chars.chunks_exact(8).enumerate() {
            let mut mask = 0u8;
            let mut value = 0u8;
            for (bit_idx, &c) in group.iter().enumerate() {
                match c {
                    b'0' | b'1' => {
                        value = (value << 1) | (c - b'0');
                        mask = (mask << 1) | 1;
                    }
                    b'.' => {
                        value <<= 1;
                        mask <<= 1;
                    }
                    other => {
                        return Err(PatternError::BadCharacter {
                            ch: other as char,
                            pos: byte_idx * 8 + bit_idx,
                        }
                        .into());
                    }
                }
            }

            let mut class: ByteClass = [0; 4];
            for b in 0u16..256 {
                if (b as u8) & mask == value {
                    class[(b >> 6) as usize] |= 1u64 << (b & 63);
                }
            }
            classes.push(class);
        }

        Ok(Self { classes })
    }

    /// Pattern length in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.classes.len()
    }

    /// Match `buf` from its start, stopping at the first rejected byte.
    ///
    /// A buffer shorter than the pattern never fully matches; `matched_len`
    /// still reports how far it got.
    pub fn match_prefix(&self, buf: &[u8]) -> MatchResult {
        let mut i = 0;
        while i < buf.len() && i < self.classes.len() {
            if !class_contains(&self.classes[i], buf[i]) {
                return MatchResult {
                    is_match: false,
                    matched_len: i,
                };
            }
            i += 1;
        }
        MatchResult {
            is_match: i == self.classes.len(),
            matched_len: i,
        }
    }

    /// Smallest accepted byte value >= `floor` at `position`, if any.
    ///
    /// Drives the suffix-order scan strategy: after a rejection it names the
    /// next byte string worth probing.
    pub fn next_accepted(&self, position: usize, floor: u8) -> Option<u8> {
        let class = self.classes.get(position)?;
        (floor..=u8::MAX).find(|&b| class_contains(class, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn test_single_byte_pattern() {
        // 1.0..... packs MSB-first: mask 0xA0, value 0x80, so it accepts
        // bytes with bit 7 set and bit 5 clear.
        let m = BitPatternMatcher::compile(b"1.0.....").unwrap();
        assert_eq!(m.byte_len(), 1);

        let hit = m.match_prefix(&[0x90]);
        assert!(hit.is_match);
        assert_eq!(hit.matched_len, 1);

        // 0xA0 = 10100000 has bit 5 set where the pattern demands 0.
        for miss_byte in [0xA0u8, 0x20] {
            let miss = m.match_prefix(&[miss_byte]);
            assert!(!miss.is_match);
            assert_eq!(miss.matched_len, 0);
        }
    }

    #[test]
    fn test_multi_byte_match_records_prefix_len() {
        let m = BitPatternMatcher::compile(b"0000000011111111........").unwrap();
        assert_eq!(m.byte_len(), 3);

        assert!(m.match_prefix(&[0x00, 0xFF, 0x42]).is_match);

        let partial = m.match_prefix(&[0x00, 0xFE, 0x42]);
        assert!(!partial.is_match);
        assert_eq!(partial.matched_len, 1);
    }

    #[test]
    fn test_short_buffer_never_matches() {
        let m = BitPatternMatcher::compile(b"................").unwrap();
        let res = m.match_prefix(&[0xAA]);
        assert!(!res.is_match);
        assert_eq!(res.matched_len, 1);

        let res = m.match_prefix(&[]);
        assert!(!res.is_match);
        assert_eq!(res.matched_len, 0);
    }

    #[test]
    fn test_all_wildcards_accept_anything() {
        let m = BitPatternMatcher::compile(b"........").unwrap();
        for b in [0x00u8, 0x7F, 0xFF] {
            assert!(m.match_prefix(&[b]).is_match);
        }
    }

    #[test]
    fn test_next_accepted() {
        let m = BitPatternMatcher::compile(b"1.0.....").unwrap();
        // Accepted values are exactly those with (b & 0xA0) == 0x80.
        assert_eq!(m.next_accepted(0, 0x00), Some(0x80));
        assert_eq!(m.next_accepted(0, 0x80), Some(0x80));
        assert_eq!(m.next_accepted(0, 0x81), Some(0x81));
        assert_eq!(m.next_accepted(0, 0xA0), Some(0xC0));
        assert_eq!(m.next_accepted(0, 0xE0), None);
        // Out-of-range position.
        assert_eq!(m.next_accepted(1, 0x00), None);
    }

    #[test]
    fn test_compile_rejects_bad_input() {
        assert!(matches!(
            BitPatternMatcher::compile(b"0101"),
            Err(SearchError::InvalidPattern(PatternError::NotByteAligned { bits: 4 }))
        ));
        assert!(matches!(
            BitPatternMatcher::compile(b""),
            Err(SearchError::InvalidPattern(PatternError::Empty))
        ));
        assert!(matches!(
            BitPatternMatcher::compile(b"0101010x"),
            Err(SearchError::InvalidPattern(PatternError::BadCharacter { ch: 'x', pos: 7 }))
        ));
    }
}
