use clap::Parser;
use colored::*;
use molblast::cli::{Cli, Commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging with MOLBLAST_LOG environment variable support
    let log_level = std::env::var("MOLBLAST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<molblast::MolblastError>() {
            Some(molblast::MolblastError::Config(_)) => 2,
            Some(molblast::MolblastError::Storage { .. }) => 3,
            Some(molblast::MolblastError::Parse(_))
            | Some(molblast::MolblastError::FeatureExtraction(_))
            | Some(molblast::MolblastError::QueryConversion(_)) => 4,
            Some(molblast::MolblastError::DatabaseIntegrity { .. })
            | Some(molblast::MolblastError::OutOfRange { .. }) => 5,
            Some(molblast::MolblastError::Cancelled) => 130,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Configure thread pool
    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .expect("Failed to initialize thread pool");

    if cli.verbose > 0 {
        eprintln!("Using {} threads", num_threads);
    }

    match cli.command {
        Commands::Build(args) => molblast::cli::commands::build::run(args),
        Commands::Search(args) => molblast::cli::commands::search::run(args),
    }
}
