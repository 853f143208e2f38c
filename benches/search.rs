//! Performance benchmarks for bitgrep
//!
//! Run with: cargo bench

use bitgrep::query::{BitGrep, BitPattern, BitPatternMatcher, IndexArray};
use bitgrep::{FileSet, SuffixArrayFile};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a random dataset and its naively sorted suffix array.
fn create_benchmark_fixture(len: usize) -> (TempDir, FileSet, SuffixArrayFile) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut rng = StdRng::seed_from_u64(0xB17);
    let data: Vec<u8> = (0..len).map(|_| rng.r#gen()).collect();

    let data_path = dir.path().join("data.bin");
    fs::write(&data_path, &data).expect("Failed to write data");

    let mut sa: Vec<i32> = (0..data.len() as i32).collect();
    sa.sort_by(|&a, &b| data[a as usize..].cmp(&data[b as usize..]));
    let mut bytes = Vec::with_capacity(sa.len() * 4);
    for e in sa {
        bytes.extend_from_slice(&e.to_le_bytes());
    }
    let sa_path = dir.path().join("data.idx");
    fs::write(&sa_path, bytes).expect("Failed to write suffix array");

    let set = FileSet::new(vec![(data_path, 0u64, len as u64)]).expect("file set");
    let sa = SuffixArrayFile::open(&sa_path, len as u64).expect("suffix array");
    (dir, set, sa)
}

/// A pattern copied out of the dataset so it has at least one hit.
fn pattern_from(dir: &Path, at: usize, bits: usize) -> BitPattern {
    let data = fs::read(dir.join("data.bin")).unwrap();
    let chars: String = (0..bits)
        .map(|k| {
            let pos = at * 8 + k;
            char::from(b'0' + ((data[pos / 8] >> (7 - pos % 8)) & 1))
        })
        .collect();
    BitPattern::parse(&chars).unwrap()
}

fn bench_matcher(c: &mut Criterion) {
    let matcher = BitPatternMatcher::compile(b"10101010....0101........11110000").unwrap();
    let buf = [0xAAu8, 0x45, 0x99, 0xF0];

    c.bench_function("matcher_match_prefix", |b| {
        b.iter(|| black_box(matcher.match_prefix(black_box(&buf))))
    });
}

fn bench_join(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let a: Vec<i64> = (0..10_000).map(|_| rng.gen_range(0..1_000_000)).collect();
    let b_side: Vec<i64> = (0..10_000).map(|_| rng.gen_range(0..1_000_000)).collect();

    c.bench_function("join_10k_x_10k", |bench| {
        bench.iter(|| {
            let lhs = IndexArray::from_vec(a.clone());
            let rhs = IndexArray::from_vec(b_side.clone());
            black_box(lhs.join(rhs, 0))
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for &len in &[64 * 1024usize, 512 * 1024] {
        let (dir, set, sa) = create_benchmark_fixture(len);
        let grep = BitGrep::new(&set, &sa);
        let pattern = pattern_from(dir.path(), len / 2, 32);

        group.bench_with_input(BenchmarkId::new("grep_32bit", len), &len, |b, _| {
            b.iter(|| black_box(grep.search(&pattern, 1024).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matcher, bench_join, bench_search);
criterion_main!(benches);
