//! Suffix array access and search
//!
//! This module provides O(m log n) substring location over the logical byte
//! space, including searches whose final byte is only partially constrained
//! by a bit mask.
//!
//! - `store`: Memory-mapped access to the on-disk entry table
//! - `search`: Order-statistics binary search with match memoization
//! - `types`: Core type definitions and format constants

pub mod search;
pub mod store;
pub mod types;

pub use search::SearchEngine;
pub use store::SuffixArrayFile;
pub use types::SlotRange;
