//! Error taxonomy for the search engine.
//!
//! The core engine never signals failure through sentinel lengths or negative
//! counts; every fallible operation returns a tagged [`SearchError`]. A full
//! result buffer is documented truncation, not an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by the index and query layers.
#[derive(Debug)]
pub enum SearchError {
    /// The query pattern was rejected before any I/O happened.
    InvalidPattern(PatternError),
    /// A logical offset or suffix-array slot fell outside the addressable range.
    OutOfBounds { offset: u64, limit: u64 },
    /// A physical file ended before its span declared in the manifest.
    ///
    /// Distinct from [`SearchError::Io`]: the OS call succeeded but the file
    /// on disk is shorter than the dataset description says. The caller
    /// decides whether that is a truncated dataset or a stale manifest.
    ShortRead {
        path: PathBuf,
        wanted: usize,
        got: usize,
    },
    /// An open/seek/read against a physical file failed.
    Io { path: PathBuf, source: io::Error },
    /// The suffix array file is too small for the dataset it claims to index.
    IndexTooSmall {
        path: PathBuf,
        expected_bytes: u64,
        actual_bytes: u64,
    },
    /// A suffix array slot held a negative entry.
    CorruptEntry { slot: u64, value: i32 },
    /// The dataset exceeds the 32-bit entry format of the index.
    DatasetTooLarge { total_len: u64, max: u64 },
}

/// Reasons a `{0,1,.}` pattern can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// The input string was empty.
    Empty,
    /// Every character was a wildcard, nothing to search for.
    OnlyWildcards,
    /// Fewer significant bits than the configured minimum after trimming.
    TooShort { bits: usize, min: usize },
    /// More bits than the staging buffers allow.
    TooLong { bits: usize, max: usize },
    /// A character other than `0`, `1` or `.`.
    BadCharacter { ch: char, pos: usize },
    /// A compiled window must cover whole bytes.
    NotByteAligned { bits: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "empty pattern"),
            PatternError::OnlyWildcards => {
                write!(f, "pattern contains only wildcards after trimming")
            }
            PatternError::TooShort { bits, min } => {
                write!(f, "pattern has {bits} significant bits, minimum is {min}")
            }
            PatternError::TooLong { bits, max } => {
                write!(f, "pattern has {bits} bits, maximum is {max}")
            }
            PatternError::BadCharacter { ch, pos } => {
                write!(f, "invalid character {ch:?} at position {pos}, expected '0', '1' or '.'")
            }
            PatternError::NotByteAligned { bits } => {
                write!(f, "compiled window of {bits} bits is not a multiple of 8")
            }
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidPattern(e) => write!(f, "invalid pattern: {e}"),
            SearchError::OutOfBounds { offset, limit } => {
                write!(f, "offset {offset} out of bounds (limit {limit})")
            }
            SearchError::ShortRead { path, wanted, got } => write!(
                f,
                "short read from {}: wanted {wanted} bytes, got {got} (file shorter than its manifest span)",
                path.display()
            ),
            SearchError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            SearchError::IndexTooSmall {
                path,
                expected_bytes,
                actual_bytes,
            } => write!(
                f,
                "suffix array {} holds {actual_bytes} bytes, dataset needs at least {expected_bytes}",
                path.display()
            ),
            SearchError::CorruptEntry { slot, value } => {
                write!(f, "suffix array slot {slot} holds negative entry {value}")
            }
            SearchError::DatasetTooLarge { total_len, max } => {
                write!(f, "dataset length {total_len} exceeds index format limit {max}")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PatternError> for SearchError {
    fn from(e: PatternError) -> Self {
        SearchError::InvalidPattern(e)
    }
}
