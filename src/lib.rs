//! # bitgrep - Bit-Level Pattern Search over Indexed Binary Datasets
//!
//! bitgrep finds occurrences of a bit pattern (a string over `0`, `1` and
//! the wildcard `.`) anywhere in a multi-file binary dataset, at any bit
//! offset, without scanning the data. A prebuilt suffix array over the
//! concatenated files answers each query in logarithmic probe time.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`config`] - Dataset manifests (index file + raw file fragments)
//! - [`index`] - The virtual file set and the memory-mapped suffix array
//! - [`query`] - Pattern parsing, alignment planning, and the two search
//!   strategies (run probing and suffix-order scanning)
//! - [`output`] - Mapping logical matches back onto physical files
//!
//! ## Quick Start
//!
//! ```ignore
//! use bitgrep::config::Manifest;
//! use bitgrep::index::SuffixArrayFile;
//! use bitgrep::query::{BitGrep, BitPattern};
//! use std::path::Path;
//!
//! let base = Path::new("/path/to/dataset");
//! let manifest = Manifest::load(&base.join("dataset.json")).unwrap();
//! let data = manifest.file_set(base).unwrap();
//! let sa = SuffixArrayFile::open(&manifest.index_path(base), data.total_len()).unwrap();
//!
//! let pattern = BitPattern::parse("1101111010101101....1011").unwrap();
//! let matches = BitGrep::new(&data, &sa).search(&pattern, 1000).unwrap();
//! for m in &matches {
//!     println!("byte {} bit {}", m.byte_offset, m.bit_offset);
//! }
//! ```
//!
//! ## Search Strategy
//!
//! A pattern is tried at all 8 bit alignments against a byte boundary. Each
//! alignment decomposes into deterministic byte runs; the executor probes
//! every run in the suffix array, enumerates the rarest one (or intersects
//! the two rarest when both are cheap enough), and verifies the surviving
//! candidate anchors against a compiled per-byte acceptance table.

pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod query;

pub use config::Manifest;
pub use error::{PatternError, Result, SearchError};
pub use index::{FileSet, SuffixArrayFile};
pub use output::{map_matches, FileMatch};
pub use query::{suffix_scan, BitGrep, BitMatch, BitPattern, GrepOptions};
