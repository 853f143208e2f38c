//! Suffix-order scan search.
//!
//! An alternative to the run-probing executor that walks the suffix array in
//! sorted order. At each position it matches the window against the suffix's
//! leading bytes; on a rejection it asks the matcher for the next acceptable
//! byte at the failing position and long-jumps the walk there with a binary
//! search, skipping every suffix that shares the rejected prefix.

use super::matcher::BitPatternMatcher;
use super::pattern::BitPattern;
use super::planner::AlignmentPlan;
use crate::error::{PatternError, Result};
use crate::index::fileset::FileSet;
use crate::index::suffix_array::search::SearchEngine;
use crate::index::suffix_array::store::SuffixArrayFile;
use crate::query::executor::{BitMatch, GrepOptions};

/// Find up to `limit` occurrences of `pattern` by scanning the suffix array
/// in order, once per bit alignment. Results are sorted by position.
pub fn suffix_scan(
    data: &FileSet,
    sa: &SuffixArrayFile,
    pattern: &BitPattern,
    opts: GrepOptions,
    limit: usize,
) -> Result<Vec<BitMatch>> {
    if pattern.bit_len() < opts.min_bits {
        return Err(PatternError::TooShort {
            bits: pattern.bit_len(),
            min: opts.min_bits,
        }
        .into());
    }

    let engine = SearchEngine::new(sa, data);
    let mut matches = Vec::new();

    for shift in 0u8..8 {
        if matches.len() >= limit {
            break;
        }
        let plan = AlignmentPlan::build(pattern, shift);
        scan_alignment(data, sa, &engine, pattern, &plan, limit, &mut matches)?;
    }

    matches.sort_unstable();
    matches.truncate(limit);
    Ok(matches)
}

fn scan_alignment(
    data: &FileSet,
    sa: &SuffixArrayFile,
    engine: &SearchEngine<'_>,
    pattern: &BitPattern,
    plan: &AlignmentPlan,
    limit: usize,
    matches: &mut Vec<BitMatch>,
) -> Result<()> {
    let matcher = BitPatternMatcher::compile(&plan.window)?;
    let window_bytes = plan.window_bytes();
    let n = sa.slot_count();
    let mut buf = vec![0u8; window_bytes];

    let mut idx = 0u64;
    while idx < n && matches.len() < limit {
        let at = sa.entry(idx)?;
        let avail = data.total_len().saturating_sub(at).min(window_bytes as u64) as usize;
        let got = if avail > 0 {
            data.read_at(at, &mut buf[..avail])?
        } else {
            0
        };

        let res = matcher.match_prefix(&buf[..got]);
        if res.is_match {
            // Every suffix sharing these window bytes matches too; take the
            // whole equal range and resume past it.
            let range = engine.equal_range(&buf[..window_bytes])?;
            for slot in range.start..range.end() {
                if matches.len() >= limit {
                    break;
                }
                matches.push(BitMatch {
                    byte_offset: sa.entry(slot)?,
                    bit_offset: plan.shift,
                    bit_len: pattern.bit_len() as u32,
                });
            }
            idx = range.end();
            continue;
        }

        let ml = res.matched_len;
        if ml >= got {
            // The suffix ran out of data while still acceptable; only this
            // one slot is ruled out.
            idx += 1;
            continue;
        }

        match matcher.next_accepted(ml, buf[ml]) {
            Some(next) => {
                // The rejected byte was below an acceptable value; jump to
                // the first suffix at or above the raised prefix. The raised
                // prefix is strictly greater than the current suffix, so the
                // walk always advances.
                buf[ml] = next;
                let range = engine.equal_range(&buf[..=ml])?;
                idx = range.start;
            }
            None if ml == 0 => {
                // Nothing acceptable remains at the first byte.
                idx = n;
            }
            None => {
                // No acceptable byte at position ml anymore; skip every
                // suffix still sharing the matched prefix.
                let range = engine.equal_range(&buf[..ml])?;
                idx = range.end();
            }
        }
    }

    Ok(())
}
