//! Per-alignment query plans.
//!
//! The suffix array is byte-granular while queries are bit patterns, so a
//! trimmed pattern is tried at each of the 8 bit offsets against a byte
//! boundary. Each trial works over a *window*: the pattern prefixed with
//! `shift` wildcards and padded with trailing wildcards to a whole number of
//! bytes. The window decomposes into maximal deterministic runs, each
//! searchable as a byte string plus a trailing partial-byte mask.

use super::pattern::{deterministic_prefix, BitPattern, DeterministicRun};

/// One bit-alignment trial of a pattern.
#[derive(Debug)]
pub struct AlignmentPlan {
    /// Bit offset of the pattern's first significant bit within the window's
    /// first byte.
    pub shift: u8,
    /// Window characters over `{0,1,.}`; length is a multiple of 8.
    pub window: Vec<u8>,
    /// Deterministic runs in window order.
    pub runs: Vec<DeterministicRun>,
}

impl AlignmentPlan {
    /// Build the plan for one of the 8 alignments.
    pub fn build(pattern: &BitPattern, shift: u8) -> Self {
        debug_assert!(shift < 8);

        let total = shift as usize + pattern.bit_len();
        let padded = total.div_ceil(8) * 8;

        let mut window = Vec::with_capacity(padded);
        window.resize(shift as usize, b'.');
        window.extend_from_slice(pattern.chars());
        window.resize(padded, b'.');

        let runs = decompose(&window);
        Self {
            shift,
            window,
            runs,
        }
    }

    /// Window length in bytes; also the verification read size.
    #[inline]
    pub fn window_bytes(&self) -> usize {
        self.window.len() / 8
    }
}

/// Split a window into deterministic runs starting at byte boundaries.
///
/// A byte position opening on a wildcard is skipped; a run covers as many
/// whole bytes as stay deterministic plus at most one masked partial byte.
fn decompose(window: &[u8]) -> Vec<DeterministicRun> {
    let mut runs = Vec::new();
    let nbytes = window.len() / 8;

    let mut j = 0;
    while j < nbytes {
        match deterministic_prefix(&window[j * 8..]) {
            None => j += 1,
            Some((bytes, mask)) => {
                let advance = bytes.len().max(1);
                runs.push(DeterministicRun {
                    byte_offset: j,
                    bytes,
                    mask,
                });
                j += advance;
            }
        }
    }

    runs
}
