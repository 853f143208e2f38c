//! Bit pattern parsing and deterministic-run decomposition.
//!
//! A query is a string over `{0,1,.}`. Leading and trailing wildcards carry
//! no information and are trimmed before validation; matches are reported for
//! the trimmed pattern only.

use crate::error::{PatternError, Result};
use crate::index::suffix_array::types::MAX_PATTERN_BYTES;

/// Default minimum number of significant bits after trimming.
///
/// Shorter patterns produce too many false positives to be worth an indexed
/// search.
pub const MIN_PATTERN_BITS: usize = 17;

/// Maximum significant bits, leaving room in the staging buffers for the 8
/// alignment shifts plus trailing padding.
pub const MAX_PATTERN_BITS: usize = MAX_PATTERN_BYTES * 8 - 16;

/// A validated, trimmed bit pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPattern {
    bits: Vec<u8>,
}

impl BitPattern {
    /// Parse and trim a pattern string.
    ///
    /// Rejects empty input, invalid characters, all-wildcard patterns and
    /// patterns beyond the staging limit. The minimum-length floor is applied
    /// by the executor, where it is configurable for small test fixtures.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(PatternError::Empty.into());
        }
        for (pos, ch) in s.char_indices() {
            if !matches!(ch, '0' | '1' | '.') {
                return Err(PatternError::BadCharacter { ch, pos }.into());
            }
        }

        let bytes = s.as_bytes();
        let first = match bytes.iter().position(|&c| c != b'.') {
            Some(i) => i,
            None => return Err(PatternError::OnlyWildcards.into()),
        };
        let last = bytes.iter().rposition(|&c| c != b'.').unwrap();
        let bits = bytes[first..=last].to_vec();

        if bits.len() > MAX_PATTERN_BITS {
            return Err(PatternError::TooLong {
                bits: bits.len(),
                max: MAX_PATTERN_BITS,
            }
            .into());
        }

        Ok(Self { bits })
    }

    /// Significant bit length after trimming.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// The trimmed pattern characters.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.bits
    }
}

/// Pack eight `'0'`/`'1'` characters into a byte, most significant bit first.
pub fn bits_to_byte(bits: &[u8; 8]) -> u8 {
    bits.iter().fold(0u8, |acc, &b| (acc << 1) | (b - b'0'))
}

/// A maximal run of deterministic bits, byte-aligned within a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterministicRun {
    /// Byte offset of the run within its alignment window.
    pub byte_offset: usize,
    /// Packed run bytes; the final byte may be partial.
    pub bytes: Vec<u8>,
    /// Validity mask for the final byte (`0xFF` when it is fully
    /// constrained; otherwise the high `k` bits for `k` deterministic bits,
    /// with the packed byte zero in the wildcard positions).
    pub mask: u8,
}

/// Convert the leading deterministic bits of `chars` into packed bytes.
///
/// Stops at the first wildcard. Returns `None` when the very first character
/// is a wildcard; otherwise the packed bytes and the final-byte mask.
pub fn deterministic_prefix(chars: &[u8]) -> Option<(Vec<u8>, u8)> {
    let det = chars
        .iter()
        .position(|&c| c != b'0' && c != b'1')
        .unwrap_or(chars.len());
    if det == 0 {
        return None;
    }

    let full_bytes = det / 8;
    let mut bytes = Vec::with_capacity(full_bytes + 1);
    for i in 0..full_bytes {
        let group: &[u8; 8] = chars[i * 8..i * 8 + 8].try_into().unwrap();
        bytes.push(bits_to_byte(group));
    }

    let rem = det % 8;
    let mask = if rem == 0 {
        0xFF
    } else {
        let mut buf = [b'0'; 8];
        let mut mask_bits = [b'0'; 8];
        for m in 0..rem {
            buf[m] = chars[full_bytes * 8 + m];
            mask_bits[m] = b'1';
        }
        bytes.push(bits_to_byte(&buf));
        bits_to_byte(&mask_bits)
    };

    Some((bytes, mask))
}
