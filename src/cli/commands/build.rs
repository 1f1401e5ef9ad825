use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::chem::SmilesNotation;
use crate::db::DbPaths;
use crate::search;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Structure source file: one `id<TAB>structure` record per line
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Stop after this many stored records
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = super::effective_config(args.config.clone())?;
    let extractor = config.extractor();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Formatting {}", args.source.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let started = Instant::now();
    let summary = search::build_database(&args.source, &SmilesNotation, &extractor, args.limit)
        .with_context(|| format!("building database from {}", args.source.display()))?;
    spinner.finish_and_clear();

    let paths = DbPaths::derive(&args.source);
    println!(
        "Stored {} sequences ({} skipped) in {:.2?}",
        summary.stored,
        summary.skipped,
        started.elapsed()
    );
    println!("  index:  {}", paths.index.display());
    println!("  format: {}", paths.format.display());
    Ok(())
}
