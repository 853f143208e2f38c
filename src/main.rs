use anyhow::{Context, Result};
use bitgrep::config::Manifest;
use bitgrep::index::SuffixArrayFile;
use bitgrep::output;
use bitgrep::query::{suffix_scan, BitGrep, BitPattern, GrepOptions};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bitgrep")]
#[command(about = "Bit-level pattern search over indexed binary datasets")]
struct Cli {
    /// Bit pattern over '0', '1' and '.' (wildcard)
    pattern: String,

    /// Dataset manifest (JSON: index file + raw file fragments)
    manifest: PathBuf,

    /// Maximum number of matches to report
    #[arg(short, long, default_value_t = 65536)]
    limit: usize,

    /// Minimum significant bits a pattern must carry
    #[arg(long)]
    min_bits: Option<usize>,

    /// Walk the suffix array in order instead of probing runs
    #[arg(long)]
    scan: bool,

    /// Print one line per match instead of a JSON report
    #[arg(long)]
    plain: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manifest = Manifest::load(&cli.manifest)?;
    let base = cli.manifest.parent().unwrap_or(Path::new("."));
    let data = manifest
        .file_set(base)
        .context("failed to assemble dataset file set")?;
    let sa = SuffixArrayFile::open(&manifest.index_path(base), data.total_len())
        .context("failed to open suffix array")?;

    let pattern = BitPattern::parse(&cli.pattern)?;
    let mut opts = GrepOptions::default();
    if let Some(min_bits) = cli.min_bits {
        opts.min_bits = min_bits;
    }

    let matches = if cli.scan {
        suffix_scan(&data, &sa, &pattern, opts, cli.limit)?
    } else {
        BitGrep::with_options(&data, &sa, opts).search(&pattern, cli.limit)?
    };
    let mapped = output::map_matches(&data, &matches);

    if cli.plain {
        output::print_plain(&mapped, !cli.no_color)?;
    } else {
        output::print_json(io::stdout().lock(), &mapped)?;
    }
    Ok(())
}
