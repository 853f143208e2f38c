//! Virtual concatenated file set.
//!
//! A dataset is a list of physical file fragments stitched into one logical
//! byte space. Reads address the logical space; the set resolves them to
//! seek-and-read calls against the right fragment, opening file handles
//! lazily and keeping them for the lifetime of the set.

use crate::error::{Result, SearchError};
use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Largest logical space addressable by the signed 32-bit index entries.
pub const MAX_DATASET_LEN: u64 = i32::MAX as u64;

/// One physical fragment of the logical space.
#[derive(Debug)]
pub struct FileSpan {
    /// Path of the backing file.
    pub path: PathBuf,
    /// Byte offset of the fragment within the backing file.
    pub offset: u64,
    /// Fragment length in bytes.
    pub length: u64,
    /// Logical offset where this fragment begins.
    pub logical_start: u64,
    /// Lazily opened handle, shared across reads.
    handle: RefCell<Option<File>>,
}

impl FileSpan {
    /// One past the last logical offset of the fragment.
    #[inline]
    pub fn logical_end(&self) -> u64 {
        self.logical_start + self.length
    }
}

/// An ordered set of file fragments forming one logical byte space.
#[derive(Debug)]
pub struct FileSet {
    spans: Vec<FileSpan>,
    total_len: u64,
}

impl FileSet {
    /// Build a set from `(path, offset, length)` fragments in logical order.
    ///
    /// Zero-length fragments are dropped. The combined length must fit the
    /// 32-bit index entry format.
    pub fn new<P: AsRef<Path>>(fragments: Vec<(P, u64, u64)>) -> Result<Self> {
        let mut spans = Vec::with_capacity(fragments.len());
        let mut logical_start = 0u64;
        for (path, offset, length) in fragments {
            if length == 0 {
                continue;
            }
            spans.push(FileSpan {
                path: path.as_ref().to_path_buf(),
                offset,
                length,
                logical_start,
                handle: RefCell::new(None),
            });
            logical_start += length;
        }

        if logical_start > MAX_DATASET_LEN {
            return Err(SearchError::DatasetTooLarge {
                total_len: logical_start,
                max: MAX_DATASET_LEN,
            });
        }

        Ok(Self {
            spans,
            total_len: logical_start,
        })
    }

    /// Length of the logical byte space.
    #[inline]
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    #[inline]
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// The fragments in logical order.
    pub fn spans(&self) -> &[FileSpan] {
        &self.spans
    }

    /// The fragment containing a logical offset.
    pub fn span_for(&self, offset: u64) -> Option<&FileSpan> {
        self.resolve(offset).ok().map(|(i, _)| &self.spans[i])
    }

    /// Resolve a logical offset to `(span index, offset within span)`.
    pub fn resolve(&self, offset: u64) -> Result<(usize, u64)> {
        if offset >= self.total_len {
            return Err(SearchError::OutOfBounds {
                offset,
                limit: self.total_len,
            });
        }
        let idx = self
            .spans
            .partition_point(|s| s.logical_end() <= offset);
        Ok((idx, offset - self.spans[idx].logical_start))
    }

    /// Read into `buf` starting at a logical offset, crossing fragment
    /// boundaries as needed.
    ///
    /// A read reaching the end of the logical space returns the bytes that
    /// exist; a fragment whose backing file is shorter than declared is a
    /// [`SearchError::ShortRead`].
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() || offset >= self.total_len {
            return Ok(0);
        }
        let want = (buf.len() as u64).min(self.total_len - offset) as usize;

        let (mut idx, mut within) = self.resolve(offset)?;
        let mut done = 0usize;
        while done < want {
            let span = &self.spans[idx];
            let chunk = ((span.length - within) as usize).min(want - done);
            self.read_span(span, within, &mut buf[done..done + chunk])?;
            done += chunk;
            idx += 1;
            within = 0;
        }
        Ok(done)
    }

    /// Read exactly `buf.len()` bytes from one fragment at `within`.
    fn read_span(&self, span: &FileSpan, within: u64, buf: &mut [u8]) -> Result<()> {
        let io_err = |source| SearchError::Io {
            path: span.path.clone(),
            source,
        };

        let mut handle = span.handle.borrow_mut();
        if handle.is_none() {
            *handle = Some(File::open(&span.path).map_err(io_err)?);
        }
        let file = handle.as_mut().unwrap();

        file.seek(SeekFrom::Start(span.offset + within))
            .map_err(io_err)?;

        let mut done = 0usize;
        while done < buf.len() {
            let n = file.read(&mut buf[done..]).map_err(io_err)?;
            if n == 0 {
                return Err(SearchError::ShortRead {
                    path: span.path.clone(),
                    wanted: buf.len(),
                    got: done,
                });
            }
            done += n;
        }
        Ok(())
    }
}
