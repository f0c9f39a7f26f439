//! Data-quality profiling over the parsed invoice stream
//!
//! Exploratory pass run before any import: it inspects the documents the
//! segmenting parser recovered and counts the problems that bit previous
//! migration attempts, namely duplicate ids, missing fields, heterogeneous
//! date formats, mixed value types inside subdocuments, and anomalous
//! amounts. The counters are the deliverable; the console output is a plain
//! dump of them.
//!
//! Per-file load failures are logged and skipped so a single unreadable file
//! never hides the quality picture of the rest of the batch.

pub mod dates;
pub mod report;

use std::path::Path;

use anyhow::Result;

pub use report::{
    DateFieldStats, EmbedStats, IdStats, NumericStats, QualityReport, StructureStats,
    print_report, profile,
};

use crate::loader::{discover_json_files, read_text_file};
use crate::parsers::parse_concatenated;

/// Load and segment every `.json` file under `dir`, then profile the full
/// accumulated document stream.
///
/// Unreadable files are logged to stderr and skipped; their count and the
/// total skipped segmentation spans are carried in the returned report.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be scanned.
pub fn profile_dir(dir: &Path) -> Result<QualityReport> {
    let files = discover_json_files(dir)?;

    let mut documents = Vec::new();
    let mut files_loaded = 0;
    let mut files_failed = 0;
    let mut skipped_spans = 0;

    for path in &files {
        match read_text_file(path) {
            Ok(decoded) => {
                let outcome = parse_concatenated(&decoded.content);
                println!(
                    "Loaded {}: {} documents (encoding: {})",
                    path.display(),
                    outcome.documents.len(),
                    decoded.encoding
                );
                documents.extend(outcome.documents);
                skipped_spans += outcome.skipped_spans;
                files_loaded += 1;
            }
            Err(e) => {
                eprintln!("Warning: Skipping {}: {}", path.display(), e);
                files_failed += 1;
            }
        }
    }

    let mut report = profile(&documents);
    report.files_loaded = files_loaded;
    report.files_failed = files_failed;
    report.skipped_spans = skipped_spans;
    Ok(report)
}
