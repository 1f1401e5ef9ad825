pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "molblast",
    version,
    about = "BLAST-style similarity search over chemical structure fingerprints",
    long_about = "Molblast formats a tab-separated structure collection into an indexed \
                  fingerprint database, then ranks database entries against a query \
                  structure by local alignment significance."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a structure source into a searchable database
    Build(commands::build::BuildArgs),

    /// Rank database structures against a query by alignment significance
    Search(commands::search::SearchArgs),
}
