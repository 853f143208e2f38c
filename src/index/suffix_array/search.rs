//! Order-statistics binary search over the suffix array.
//!
//! Comparisons run against raw bytes fetched through the [`FileSet`], so the
//! dataset is never materialized in memory. The bisection memoizes the
//! already-confirmed common-prefix length of its boundary probes: a fresh
//! probe resumes comparing at `min(left_match, right_match)` instead of byte
//! zero, giving O(pattern_len + log n) amortized comparison work.
//!
//! Suffix ordering has no sentinel byte: a suffix that runs out of data while
//! still equal to the pattern sorts before the pattern (shorter-is-smaller,
//! applied one-sided when the suffix is an exact prefix).

use super::store::SuffixArrayFile;
use super::types::{SlotRange, MAX_PATTERN_BYTES};
use crate::error::{PatternError, Result};
use crate::index::fileset::FileSet;
use std::cmp::Ordering;

/// Which edge of an equal range a bisection resolves.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// First slot whose suffix is >= the pattern.
    Lower,
    /// First slot whose suffix is > the pattern.
    Upper,
}

/// Binary search engine over one suffix array and its backing data.
pub struct SearchEngine<'a> {
    sa: &'a SuffixArrayFile,
    data: &'a FileSet,
}

impl<'a> SearchEngine<'a> {
    pub fn new(sa: &'a SuffixArrayFile, data: &'a FileSet) -> Self {
        Self { sa, data }
    }

    /// The maximal contiguous slot range whose suffixes start with `pattern`.
    ///
    /// An empty pattern matches every slot. Patterns beyond the staging
    /// buffer limit are rejected rather than silently clipped.
    pub fn equal_range(&self, pattern: &[u8]) -> Result<SlotRange> {
        if pattern.len() > MAX_PATTERN_BYTES {
            return Err(PatternError::TooLong {
                bits: pattern.len() * 8,
                max: MAX_PATTERN_BYTES * 8,
            }
            .into());
        }

        let n = self.sa.slot_count();
        if pattern.is_empty() {
            return Ok(SlotRange { start: 0, count: n });
        }
        if n == 0 {
            return Ok(SlotRange::empty_at(0));
        }

        let lo = self.bisect(pattern, 0, n, Edge::Lower)?;
        if lo == n {
            return Ok(SlotRange::empty_at(lo));
        }
        let hi = self.bisect(pattern, lo, n, Edge::Upper)?;
        Ok(SlotRange {
            start: lo,
            count: hi - lo,
        })
    }

    /// Equal range for a byte string whose final byte is only partially
    /// constrained by `mask` (high bits set, low bits wildcarded).
    ///
    /// The unmasked prefix is located first; the resulting range is then
    /// narrowed by a secondary bisection on `(data & mask)` at the final byte
    /// position. A mask of `0xFF` degenerates to a plain search.
    pub fn equal_range_masked(&self, bytes: &[u8], mask: u8) -> Result<SlotRange> {
        if bytes.is_empty() {
            return Ok(SlotRange {
                start: 0,
                count: self.sa.slot_count(),
            });
        }
        if mask == 0xFF {
            return self.equal_range(bytes);
        }

        let base = if bytes.len() == 1 {
            SlotRange {
                start: 0,
                count: self.sa.slot_count(),
            }
        } else {
            self.equal_range(&bytes[..bytes.len() - 1])?
        };
        if base.is_empty() {
            return Ok(base);
        }

        self.narrow_by_masked_byte(base, bytes[bytes.len() - 1], mask, (bytes.len() - 1) as u64)
    }

    /// Narrow a prefix-equal range by one masked byte at `byte_offset` past
    /// the suffix start.
    ///
    /// Within a range whose suffixes share a common prefix of `byte_offset`
    /// bytes, the next byte appears in sorted order, and masking with a
    /// high-bit mask preserves that order.
    pub fn narrow_by_masked_byte(
        &self,
        range: SlotRange,
        byte: u8,
        mask: u8,
        byte_offset: u64,
    ) -> Result<SlotRange> {
        let want = byte & mask;
        let lo = self.bisect_masked(range.start, range.end(), want, mask, byte_offset, Edge::Lower)?;
        if lo == range.end() {
            return Ok(SlotRange::empty_at(lo));
        }
        let hi = self.bisect_masked(lo, range.end(), want, mask, byte_offset, Edge::Upper)?;
        Ok(SlotRange {
            start: lo,
            count: hi - lo,
        })
    }

    /// One bisection over `[lo, hi)` with match-length memoization.
    fn bisect(&self, pattern: &[u8], mut lo: u64, mut hi: u64, edge: Edge) -> Result<u64> {
        let mut lo_match = 0usize;
        let mut hi_match = 0usize;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let mut matched = lo_match.min(hi_match);
            let ord = self.compare_suffix(self.sa.entry(mid)?, pattern, &mut matched)?;

            let go_right = match edge {
                Edge::Lower => ord == Ordering::Less,
                Edge::Upper => ord != Ordering::Greater,
            };
            if go_right {
                lo = mid + 1;
                lo_match = matched;
            } else {
                hi = mid;
                hi_match = matched;
            }
        }

        Ok(lo)
    }

    /// Bisection on a single masked byte at a fixed offset past each suffix.
    fn bisect_masked(
        &self,
        mut lo: u64,
        mut hi: u64,
        want: u8,
        mask: u8,
        byte_offset: u64,
        edge: Edge,
    ) -> Result<u64> {
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let ord = self.masked_byte_at(self.sa.entry(mid)?, byte_offset, mask)?
                .map(|b| b.cmp(&want))
                // A probe past end of space sorts before any finite pattern.
                .unwrap_or(Ordering::Less);

            let go_right = match edge {
                Edge::Lower => ord == Ordering::Less,
                Edge::Upper => ord != Ordering::Greater,
            };
            if go_right {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        Ok(lo)
    }

    /// `data[suffix + byte_offset] & mask`, or `None` past end of space.
    fn masked_byte_at(&self, suffix: u64, byte_offset: u64, mask: u8) -> Result<Option<u8>> {
        let pos = suffix + byte_offset;
        if pos >= self.data.total_len() {
            return Ok(None);
        }
        let mut one = [0u8; 1];
        let got = self.data.read_at(pos, &mut one)?;
        Ok(if got == 1 { Some(one[0] & mask) } else { None })
    }

    /// Compare the suffix at `suffix` against `pattern`, resuming at the
    /// already-confirmed prefix length in `matched` and updating it.
    ///
    /// `Equal` means the pattern is a prefix of the suffix; a suffix that
    /// ends while still equal compares `Less`.
    fn compare_suffix(&self, suffix: u64, pattern: &[u8], matched: &mut usize) -> Result<Ordering> {
        let mut stage = [0u8; MAX_PATTERN_BYTES];
        let want = pattern.len() - *matched;
        let pos = suffix + *matched as u64;

        let avail = self
            .data
            .total_len()
            .saturating_sub(pos)
            .min(want as u64) as usize;
        let got = if avail > 0 {
            self.data.read_at(pos, &mut stage[..avail])?
        } else {
            0
        };

        let mut j = *matched;
        for &b in &stage[..got] {
            match b.cmp(&pattern[j]) {
                Ordering::Equal => j += 1,
                ord => {
                    *matched = j;
                    return Ok(ord);
                }
            }
        }
        *matched = j;

        if j == pattern.len() {
            Ok(Ordering::Equal)
        } else {
            // Text exhausted with the pattern still pending.
            Ok(Ordering::Less)
        }
    }
}
