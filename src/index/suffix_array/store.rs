//! On-disk suffix array store.
//!
//! The index file is a flat sequence of little-endian signed 32-bit logical
//! byte offsets, one per byte of the logical space, sorted by the
//! lexicographic order of the suffix starting at each offset. An index
//! builder may append a fixed 2^24-entry 3-gram start table after the sorted
//! entries; this reader tolerates and ignores it.
//!
//! The file is memory-mapped for random access without loading it into
//! memory; the search path touches O(log n) entries per probe.

use super::types::{SaEntry, SA_ENTRY_SIZE};
use crate::error::{Result, SearchError};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Read-only handle to a suffix array file.
#[derive(Debug)]
pub struct SuffixArrayFile {
    /// `None` only for an empty dataset, which has no entries to map.
    mmap: Option<Mmap>,
    slot_count: u64,
    path: PathBuf,
}

impl SuffixArrayFile {
    /// Open a suffix array for a logical space of `text_len` bytes.
    ///
    /// The file must hold at least `text_len` entries; trailing bytes (the
    /// optional 3-gram table) are allowed.
    pub fn open(path: &Path, text_len: u64) -> Result<Self> {
        let expected_bytes = text_len * SA_ENTRY_SIZE as u64;

        if text_len == 0 {
            return Ok(Self {
                mmap: None,
                slot_count: 0,
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mmap = unsafe {
            Mmap::map(&file).map_err(|source| SearchError::Io {
                path: path.to_path_buf(),
                source,
            })?
        };

        if (mmap.len() as u64) < expected_bytes {
            return Err(SearchError::IndexTooSmall {
                path: path.to_path_buf(),
                expected_bytes,
                actual_bytes: mmap.len() as u64,
            });
        }

        Ok(Self {
            mmap: Some(mmap),
            slot_count: text_len,
            path: path.to_path_buf(),
        })
    }

    /// Number of slots (equals the logical byte length of the dataset).
    #[inline]
    pub fn slot_count(&self) -> u64 {
        self.slot_count
    }

    /// Path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The logical byte offset stored at a slot.
    pub fn entry(&self, slot: u64) -> Result<u64> {
        if slot >= self.slot_count {
            return Err(SearchError::OutOfBounds {
                offset: slot,
                limit: self.slot_count,
            });
        }
        // slot_count > 0 implies the map exists.
        let mmap = self.mmap.as_ref().unwrap();
        let at = slot as usize * SA_ENTRY_SIZE;
        let raw = SaEntry::from_le_bytes(mmap[at..at + SA_ENTRY_SIZE].try_into().unwrap());
        if raw < 0 {
            return Err(SearchError::CorruptEntry { slot, value: raw });
        }
        Ok(raw as u64)
    }
}
