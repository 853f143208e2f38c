//! Indexed bit-pattern search.
//!
//! For each of the 8 bit alignments the executor probes the suffix array with
//! the alignment's deterministic runs, picks the cheapest candidate strategy
//! (enumerate the rarest run, or join the two rarest), and verifies every
//! surviving anchor against the compiled window matcher.

use super::join::IndexArray;
use super::matcher::BitPatternMatcher;
use super::pattern::{BitPattern, MIN_PATTERN_BITS};
use super::planner::AlignmentPlan;
use crate::error::{PatternError, Result};
use crate::index::fileset::FileSet;
use crate::index::suffix_array::search::SearchEngine;
use crate::index::suffix_array::store::SuffixArrayFile;
use crate::index::suffix_array::types::{SlotRange, SA_ENTRY_SIZE};

/// Cap on candidates fetched from any one suffix-array range.
pub const DEFAULT_MAX_EVALUATIONS: usize = 1 << 20;

/// Tuning knobs for the executor.
#[derive(Debug, Clone, Copy)]
pub struct GrepOptions {
    /// Minimum significant bits a pattern must carry.
    pub min_bits: usize,
    /// Candidate fetch cap per suffix-array range.
    pub max_evaluations: usize,
}

impl Default for GrepOptions {
    fn default() -> Self {
        Self {
            min_bits: MIN_PATTERN_BITS,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }
}

/// A verified match, positioned in the logical byte space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitMatch {
    /// Logical byte offset of the byte holding the first significant bit.
    pub byte_offset: u64,
    /// Bit offset of the first significant bit within that byte, 0 to 7.
    pub bit_offset: u8,
    /// Significant length of the matched pattern in bits.
    pub bit_len: u32,
}

/// Search driver over one dataset and its suffix array.
pub struct BitGrep<'a> {
    data: &'a FileSet,
    sa: &'a SuffixArrayFile,
    opts: GrepOptions,
}

/// A probed run: its plan index and the slot range it selects.
struct ProbedRun {
    run_idx: usize,
    range: SlotRange,
}

impl<'a> BitGrep<'a> {
    pub fn new(data: &'a FileSet, sa: &'a SuffixArrayFile) -> Self {
        Self::with_options(data, sa, GrepOptions::default())
    }

    pub fn with_options(data: &'a FileSet, sa: &'a SuffixArrayFile, opts: GrepOptions) -> Self {
        Self { data, sa, opts }
    }

    /// Find up to `limit` occurrences of `pattern`, each reported at the byte
    /// and bit offset of its first significant bit. Results are sorted by
    /// position.
    pub fn search(&self, pattern: &BitPattern, limit: usize) -> Result<Vec<BitMatch>> {
        if pattern.bit_len() < self.opts.min_bits {
            return Err(PatternError::TooShort {
                bits: pattern.bit_len(),
                min: self.opts.min_bits,
            }
            .into());
        }

        let engine = SearchEngine::new(self.sa, self.data);
        let mut matches = Vec::new();

        for shift in 0u8..8 {
            if matches.len() >= limit {
                break;
            }
            let plan = AlignmentPlan::build(pattern, shift);
            self.search_alignment(&engine, pattern, &plan, limit, &mut matches)?;
        }

        matches.sort_unstable();
        matches.truncate(limit);
        Ok(matches)
    }

    /// Run one alignment: probe runs, pick a strategy, verify candidates.
    fn search_alignment(
        &self,
        engine: &SearchEngine<'_>,
        pattern: &BitPattern,
        plan: &AlignmentPlan,
        limit: usize,
        matches: &mut Vec<BitMatch>,
    ) -> Result<()> {
        // An alignment where every byte boundary lands on a wildcard has
        // nothing to probe.
        if plan.runs.is_empty() {
            return Ok(());
        }

        let mut best: Option<ProbedRun> = None;
        let mut second: Option<ProbedRun> = None;
        for (run_idx, run) in plan.runs.iter().enumerate() {
            let range = engine.equal_range_masked(&run.bytes, run.mask)?;
            if range.is_empty() {
                // One impossible run rules out the whole alignment.
                return Ok(());
            }
            let probed = ProbedRun { run_idx, range };
            let beats_best = best
                .as_ref()
                .map_or(true, |b| probed.range.count < b.range.count);
            if beats_best {
                second = best.take();
                best = Some(probed);
            } else if second
                .as_ref()
                .map_or(true, |s| probed.range.count < s.range.count)
            {
                second = Some(probed);
            }
        }
        let best = best.unwrap();

        let candidates = match second {
            Some(second) => {
                let joint_cost = (best.range.count + second.range.count)
                    * SA_ENTRY_SIZE as u64
                    / 4096;
                if best.range.count < joint_cost {
                    self.fetch(&best, plan)?
                } else {
                    let a = self.fetch(&best, plan)?;
                    let b = self.fetch(&second, plan)?;
                    a.join(b, 0)
                }
            }
            None => self.fetch(&best, plan)?,
        };
        if candidates.is_empty() {
            return Ok(());
        }

        let matcher = BitPatternMatcher::compile(&plan.window)?;
        let window_bytes = plan.window_bytes();
        let mut buf = vec![0u8; window_bytes];

        for anchor in candidates.iter() {
            if matches.len() >= limit {
                break;
            }
            if anchor < 0 {
                continue;
            }
            let at = anchor as u64;
            if at + window_bytes as u64 > self.data.total_len() {
                continue;
            }
            let got = self.data.read_at(at, &mut buf)?;
            if matcher.match_prefix(&buf[..got]).is_match {
                matches.push(BitMatch {
                    byte_offset: at,
                    bit_offset: plan.shift,
                    bit_len: pattern.bit_len() as u32,
                });
            }
        }

        Ok(())
    }

    fn fetch(&self, probed: &ProbedRun, plan: &AlignmentPlan) -> Result<IndexArray> {
        let run = &plan.runs[probed.run_idx];
        IndexArray::fetch(
            self.sa,
            probed.range,
            run.byte_offset as u64,
            self.opts.max_evaluations,
        )
    }
}
