use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::convert::convert_dir;
use crate::profiler::{print_report, profile_dir};
use crate::restructure;

#[derive(Parser)]
#[command(name = "streamit-migrate")]
#[command(version = "0.1.0")]
#[command(about = "Migration utilities for the streamit billing dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite multi-object JSON dumps as valid JSON array files
    Convert {
        /// Directory containing the raw .json dump files
        #[arg(long)]
        input: PathBuf,
        /// Directory for the converted array files
        #[arg(long)]
        output: PathBuf,
    },
    /// Report data-quality problems across a dump directory
    Profile {
        /// Directory containing the raw .json dump files
        #[arg(long)]
        input: PathBuf,
    },
    /// Extract movie/series catalogs and rewrite invoices with references
    Restructure {
        /// Directory containing the raw .json dump files
        #[arg(long)]
        input: PathBuf,
        /// Directory for the restructured collections
        #[arg(long)]
        output: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert { input, output } => {
            let summary = convert_dir(input, output)?;
            println!();
            println!("Conversion complete");
            println!("  Files processed: {}", summary.files_processed);
            println!("  Files failed: {}", summary.files_failed);
            println!("  Total documents: {}", summary.total_documents);
            println!("  Skipped spans: {}", summary.total_skipped_spans);
        }
        Commands::Profile { input } => {
            let report = profile_dir(input)?;
            print_report(&report);
        }
        Commands::Restructure { input, output } => {
            let summary = restructure::run(input, output)?;
            println!("Restructuring complete");
            println!("  Invoices rewritten: {}", summary.invoices);
            println!("  Unique movies: {}", summary.movies);
            println!("  Unique series: {}", summary.series);
            println!("  Files loaded: {} ({} failed)", summary.files_loaded, summary.files_failed);
        }
    }

    Ok(())
}
