//! Dataset manifest.
//!
//! A manifest is a JSON file describing one searchable dataset: the suffix
//! array file and the ordered list of raw file fragments whose concatenation
//! is the indexed logical space. Relative paths are resolved against the
//! directory containing the manifest.

use crate::index::fileset::FileSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One raw file fragment of the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFile {
    /// Path of the backing file.
    pub name: PathBuf,
    /// Byte offset of the fragment within the file.
    #[serde(default)]
    pub offset: u64,
    /// Fragment length in bytes.
    pub length: u64,
}

/// A dataset description: index file plus ordered raw fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Suffix array file for the concatenated fragments.
    pub index_file: PathBuf,
    /// Fragments in logical order.
    pub raw_files: Vec<RawFile>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open manifest {}", path.display()))?;
        let manifest: Manifest = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        Ok(manifest)
    }

    /// Path of the suffix array file, resolved against `base`.
    pub fn index_path(&self, base: &Path) -> PathBuf {
        resolve(base, &self.index_file)
    }

    /// Build the [`FileSet`] for the described fragments, resolved against
    /// `base`.
    pub fn file_set(&self, base: &Path) -> crate::error::Result<FileSet> {
        FileSet::new(
            self.raw_files
                .iter()
                .map(|f| (resolve(base, &f.name), f.offset, f.length))
                .collect(),
        )
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
