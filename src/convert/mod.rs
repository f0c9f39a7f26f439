//! Batch conversion of multi-object JSON dumps into valid JSON array files
//!
//! Each source file in the billing dump holds many invoice objects written
//! back to back with no separators, which standard import tools reject. The
//! converter segments every file and rewrites it as a pretty-printed JSON
//! array under the output directory, keeping the original file name.
//!
//! # Error Handling Strategy
//!
//! Per-file failures (unreadable file, zero recoverable documents) are logged
//! to stderr and counted; they never abort the batch. The summary reports
//! processed files, total documents, skipped spans, and failed files so the
//! operator can judge completeness before importing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::loader::{discover_json_files, read_text_file};
use crate::parsers::parse_concatenated;

/// Outcome of converting one source file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    pub encoding: &'static str,
    pub documents: usize,
    pub skipped_spans: usize,
}

/// Aggregate outcome of a directory conversion.
#[derive(Debug, Default)]
pub struct ConvertSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_documents: usize,
    pub total_skipped_spans: usize,
}

/// Convert one multi-object JSON file into a valid JSON array file.
///
/// Loads the file through the encoding fallback chain, segments it, and
/// writes the recovered documents as a pretty-printed array to `output`.
/// A file that yields zero documents produces no output file and is reported
/// in the [`FileReport`], not treated as an error.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written.
pub fn convert_file(input: &Path, output: &Path) -> Result<FileReport> {
    let decoded = read_text_file(input)?;
    let outcome = parse_concatenated(&decoded.content);

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());

    if !outcome.documents.is_empty() {
        let json = serde_json::to_string_pretty(&outcome.documents)
            .context("Failed to serialize document array")?;
        fs::write(output, json)
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    }

    Ok(FileReport {
        file_name,
        encoding: decoded.encoding,
        documents: outcome.documents.len(),
        skipped_spans: outcome.skipped_spans,
    })
}

/// Convert every `.json` file under `input_dir`, writing array files with the
/// same names under `output_dir`.
///
/// Files are converted in parallel; segmentation is a pure function per
/// buffer, so independent files are safe to process concurrently. One bad
/// file is logged and counted as failed without aborting the batch.
///
/// # Errors
///
/// Returns an error if the input directory cannot be scanned or the output
/// directory cannot be created. Per-file failures are reported in the
/// summary instead.
pub fn convert_dir(input_dir: &Path, output_dir: &Path) -> Result<ConvertSummary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let files = discover_json_files(input_dir)?;

    let reports: Vec<Result<FileReport>> = files
        .par_iter()
        .map(|input| {
            // Keep the input's relative path so same-named files in
            // different subdirectories cannot collide in the output.
            let relative = input.strip_prefix(input_dir).unwrap_or_else(|_| input.as_path());
            let output = output_dir.join(relative);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            convert_file(input, &output)
        })
        .collect();

    let mut summary = ConvertSummary::default();
    for (input, report) in files.iter().zip(reports) {
        match report {
            Ok(report) => {
                summary.files_processed += 1;
                summary.total_documents += report.documents;
                summary.total_skipped_spans += report.skipped_spans;
                if report.documents == 0 {
                    eprintln!(
                        "Warning: No documents recovered from {}",
                        input.display()
                    );
                } else {
                    println!(
                        "Converted {} -> {} documents (encoding: {}, skipped spans: {})",
                        report.file_name, report.documents, report.encoding,
                        report.skipped_spans
                    );
                }
            }
            Err(e) => {
                summary.files_failed += 1;
                eprintln!("Warning: Failed to convert {}: {}", input.display(), e);
            }
        }
    }

    Ok(summary)
}
