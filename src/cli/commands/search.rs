use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use crate::chem::SmilesNotation;
use crate::report::{self, ReportFormat};
use crate::search::{self, by_evalue, by_significance, CancelToken, HitComparator};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Structure source file paired with the database artifacts
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Query structure in SMILES notation
    #[arg(short, long, value_name = "SMILES")]
    pub query: String,

    /// Number of hits to report
    #[arg(short = 'k', long, default_value = "10")]
    pub top_k: usize,

    /// Fraction of the database to scan, in (0, 1]
    #[arg(long, default_value = "1.0", value_name = "FRACTION")]
    pub sample_fraction: f64,

    /// Output format
    #[arg(short, long, default_value = "plain", value_parser = ["plain", "tsv"])]
    pub format: String,

    /// Rank hits by e-value instead of bit score
    #[arg(long)]
    pub by_evalue: bool,

    /// Configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    let config = super::effective_config(args.config.clone())?;
    let mut options = config.search_options()?;
    options.top_k = args.top_k;
    options.sample_fraction = args.sample_fraction;

    let format = match args.format.as_str() {
        "tsv" => ReportFormat::Tsv,
        _ => ReportFormat::Plain,
    };
    let comparator: HitComparator = if args.by_evalue {
        by_evalue
    } else {
        by_significance
    };

    let extractor = config.extractor();
    let cancel = CancelToken::new();
    let started = Instant::now();
    let hits = search::search_source(
        &args.source,
        &args.query,
        &SmilesNotation,
        &extractor,
        &options,
        comparator,
        &cancel,
    )
    .with_context(|| format!("searching {}", args.source.display()))?;

    let mut out = std::io::stdout().lock();
    report::write_hits(&mut out, &args.query, &hits, format)?;
    drop(out);

    if format == ReportFormat::Plain {
        println!("Search completed in {:.2?}", started.elapsed());
    }
    Ok(())
}
