//! Types and format constants for the on-disk suffix array.

/// On-disk suffix array entry: a signed 32-bit logical byte offset.
pub type SaEntry = i32;

/// Size of one entry in the index file.
pub const SA_ENTRY_SIZE: usize = std::mem::size_of::<SaEntry>();

/// Upper bound on the byte length of a single binary-search pattern, sized to
/// the local read staging buffers.
pub const MAX_PATTERN_BYTES: usize = 4096;

/// Number of entries in the optional trailing 3-gram start table.
///
/// Index builders may append a 2^24-entry prefix-sum block after the sorted
/// entries; the search path ignores it.
pub const GRAM_TABLE_ENTRIES: usize = 1 << 24;

/// A contiguous range of suffix-array slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    /// First slot of the range.
    pub start: u64,
    /// Number of slots in the range.
    pub count: u64,
}

impl SlotRange {
    /// An empty range positioned at an insertion point.
    pub fn empty_at(start: u64) -> Self {
        Self { start, count: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// One past the last slot of the range.
    #[inline]
    pub fn end(&self) -> u64 {
        self.start + self.count
    }
}
