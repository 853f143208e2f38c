//! Candidate index arrays and the tolerance join.
//!
//! An [`IndexArray`] is a batch of candidate anchors read from a contiguous
//! suffix-array range and normalized to a common anchor point by subtracting
//! the sub-pattern's byte offset. The join consumes both inputs by value, so
//! exactly one owner ever releases each array.

use crate::error::Result;
use crate::index::suffix_array::store::SuffixArrayFile;
use crate::index::suffix_array::types::SlotRange;

/// An owned batch of candidate anchors.
///
/// Anchors are signed: a suffix-array entry smaller than the sub-pattern's
/// offset normalizes to a negative anchor, which can never be a real match
/// and is filtered during verification rather than wrapping around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexArray {
    anchors: Vec<i64>,
}

impl IndexArray {
    /// Wrap pre-normalized anchors.
    pub fn from_vec(anchors: Vec<i64>) -> Self {
        Self { anchors }
    }

    /// Read a slot range from the store and normalize each entry by
    /// `anchor_offset`, fetching at most `limit` entries.
    pub fn fetch(
        sa: &SuffixArrayFile,
        range: SlotRange,
        anchor_offset: u64,
        limit: usize,
    ) -> Result<Self> {
        let take = (range.count as usize).min(limit);
        let mut anchors = Vec::with_capacity(take);
        for slot in range.start..range.start + take as u64 {
            anchors.push(sa.entry(slot)? as i64 - anchor_offset as i64);
        }
        Ok(Self { anchors })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.anchors.iter().copied()
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.anchors
    }

    /// Retain the anchors of `self` that lie within `tolerance` of some
    /// anchor of `other`.
    ///
    /// Both arrays are sorted as a side effect; taking them by value makes
    /// the reordering invisible and the release unconditional. Two-pointer
    /// merge scan: the pointer into `other` only advances once no further
    /// element of `self` can still fall within tolerance of it. With
    /// `tolerance = 0` this is exact intersection of normalized anchors.
    pub fn join(mut self, mut other: IndexArray, tolerance: i64) -> IndexArray {
        self.anchors.sort_unstable();
        other.anchors.sort_unstable();

        let mut kept = Vec::new();
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.anchors.len() && j < other.anchors.len() {
            let a = self.anchors[i];
            let b = other.anchors[j];
            if a + tolerance < b {
                i += 1;
            } else if a - tolerance > b {
                j += 1;
            } else {
                kept.push(a);
                i += 1;
                // `b` may still satisfy the next element of `self`.
            }
        }

        IndexArray { anchors: kept }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(a: &[i64], b: &[i64], tol: i64) -> Vec<i64> {
        IndexArray::from_vec(a.to_vec())
            .join(IndexArray::from_vec(b.to_vec()), tol)
            .into_vec()
    }

    #[test]
    fn test_exact_intersection() {
        assert_eq!(join(&[10, 20, 30], &[20, 40], 0), vec![20]);
    }

    #[test]
    fn test_tolerance_window() {
        // 20 is within 5 of 24; 30 is not (distance 6).
        assert_eq!(join(&[10, 20, 30], &[24], 5), vec![20]);
        // Move b to 25 and both 20 and 30 qualify.
        assert_eq!(join(&[10, 20, 30], &[25], 5), vec![20, 30]);
    }

    #[test]
    fn test_one_b_satisfies_many_a() {
        assert_eq!(join(&[9, 10, 11], &[10], 1), vec![9, 10, 11]);
    }

    #[test]
    fn test_unsorted_inputs_are_sorted_first() {
        assert_eq!(join(&[30, 10, 20], &[40, 20], 0), vec![20]);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(join(&[], &[1, 2], 0), Vec::<i64>::new());
        assert_eq!(join(&[1, 2], &[], 0), Vec::<i64>::new());
    }

    #[test]
    fn test_negative_anchors_participate() {
        assert_eq!(join(&[-3, 5], &[-3], 0), vec![-3]);
    }
}
