//! Result mapping and formatting.
//!
//! Verified matches are positioned in the logical byte space; callers want
//! them against the physical files of the dataset. A match whose occupied
//! bytes straddle two physical fragments has no single home file and is
//! dropped from the mapped output.

use crate::index::fileset::FileSet;
use crate::query::executor::BitMatch;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// A match positioned within one physical file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileMatch {
    /// Path of the physical file.
    pub name: PathBuf,
    /// Byte offset within the physical file.
    pub offset: u64,
    /// Bit offset within that byte, 0 to 7.
    pub offset_bit: u8,
    /// Significant match length in bits.
    pub length: u32,
}

/// Top-level JSON report.
#[derive(Debug, Serialize)]
struct Report<'a> {
    code: i32,
    matches: &'a [FileMatch],
}

/// Map logical matches onto physical files, dropping any match whose
/// occupied bytes cross a fragment boundary.
pub fn map_matches(set: &FileSet, matches: &[BitMatch]) -> Vec<FileMatch> {
    matches
        .iter()
        .filter_map(|m| {
            let span = set.span_for(m.byte_offset)?;
            let occupied = (m.bit_offset as u64 + m.bit_len as u64).div_ceil(8);
            if m.byte_offset + occupied > span.logical_end() {
                return None;
            }
            Some(FileMatch {
                name: span.path.clone(),
                offset: span.offset + (m.byte_offset - span.logical_start),
                offset_bit: m.bit_offset,
                length: m.bit_len,
            })
        })
        .collect()
}

/// Write the matches as a JSON report.
pub fn print_json<W: Write>(mut out: W, matches: &[FileMatch]) -> io::Result<()> {
    let report = Report { code: 0, matches };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)
}

/// Print one `file:offset+bit/len` line per match.
pub fn print_plain(matches: &[FileMatch], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    for m in matches {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(stdout, "{}", m.name.display())?;
        stdout.reset()?;
        write!(stdout, ":")?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", m.offset)?;
        stdout.reset()?;
        writeln!(stdout, "+{}/{}", m.offset_bit, m.length)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn two_file_set() -> (tempfile::TempDir, FileSet) {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        fs::write(&a, vec![0u8; 8]).unwrap();
        fs::write(&b, vec![0u8; 8]).unwrap();
        let set = FileSet::new(vec![(a, 0u64, 8u64), (b, 0u64, 8u64)]).unwrap();
        (dir, set)
    }

    #[test]
    fn test_maps_to_second_file_with_local_offset() {
        let (_dir, set) = two_file_set();
        let mapped = map_matches(
            &set,
            &[BitMatch {
                byte_offset: 10,
                bit_offset: 2,
                bit_len: 17,
            }],
        );
        assert_eq!(mapped.len(), 1);
        assert!(mapped[0].name.ends_with("b.bin"));
        assert_eq!(mapped[0].offset, 2);
        assert_eq!(mapped[0].offset_bit, 2);
        assert_eq!(mapped[0].length, 17);
    }

    #[test]
    fn test_fragment_offset_added_back() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        fs::write(&a, vec![0u8; 32]).unwrap();
        // The fragment starts 16 bytes into the physical file.
        let set = FileSet::new(vec![(a, 16u64, 16u64)]).unwrap();

        let mapped = map_matches(
            &set,
            &[BitMatch {
                byte_offset: 3,
                bit_offset: 0,
                bit_len: 24,
            }],
        );
        assert_eq!(mapped[0].offset, 19);
    }

    #[test]
    fn test_boundary_straddling_match_dropped() {
        let (_dir, set) = two_file_set();
        // 17 bits starting at bit 6 of byte 7 occupy bytes 7..10, crossing
        // the fragment boundary at byte 8.
        let mapped = map_matches(
            &set,
            &[
                BitMatch {
                    byte_offset: 7,
                    bit_offset: 6,
                    bit_len: 17,
                },
                BitMatch {
                    byte_offset: 5,
                    bit_offset: 0,
                    bit_len: 24,
                },
            ],
        );
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].offset, 5);
    }

    #[test]
    fn test_match_ending_exactly_at_boundary_kept() {
        let (_dir, set) = two_file_set();
        // 18 bits at bit 6 of byte 5 end exactly at the byte 8 boundary.
        let mapped = map_matches(
            &set,
            &[BitMatch {
                byte_offset: 5,
                bit_offset: 6,
                bit_len: 18,
            }],
        );
        assert_eq!(mapped.len(), 1);
    }

    #[test]
    fn test_json_report_shape() {
        let matches = vec![FileMatch {
            name: PathBuf::from("a.bin"),
            offset: 5,
            offset_bit: 3,
            length: 21,
        }];
        let mut buf = Vec::new();
        print_json(&mut buf, &matches).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["code"], 0);
        assert_eq!(v["matches"][0]["name"], "a.bin");
        assert_eq!(v["matches"][0]["offset"], 5);
        assert_eq!(v["matches"][0]["offset_bit"], 3);
        assert_eq!(v["matches"][0]["length"], 21);
    }
}
