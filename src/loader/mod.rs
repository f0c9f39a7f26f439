//! File loading for dirty JSON exports
//!
//! The source files come from an old billing dump and are not reliably UTF-8.
//! Loading tries a prioritized list of encodings and accepts the first one
//! that decodes; character substitution on undecodable sequences is acceptable
//! for this data, byte-exact fidelity is not required.
//!
//! A file that cannot be read at all is a hard per-file error. Batch callers
//! log it and continue with the remaining files, so one bad file never aborts
//! a whole run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use walkdir::WalkDir;

/// Text decoded from a source file, with the encoding that produced it.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub content: String,
    pub encoding: &'static str,
}

/// Read a file as text, trying strict UTF-8 first and falling back to
/// Windows-1252.
///
/// Windows-1252 is a superset of Latin-1 / ISO-8859-1 and maps every byte,
/// so the fallback cannot fail; the chain is effectively two steps. The
/// returned [`DecodedText`] names the encoding used so batch tools can report
/// it per file.
///
/// # Errors
///
/// Returns an error only if the file cannot be read from disk.
pub fn read_text_file(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(DecodedText { content, encoding: "utf-8" }),
        Err(err) => {
            let (content, _, _) = WINDOWS_1252.decode(err.as_bytes());
            Ok(DecodedText { content: content.into_owned(), encoding: "windows-1252" })
        }
    }
}

/// Collect all `.json` files under `dir`, sorted by path for deterministic
/// batch order.
///
/// # Errors
///
/// Returns an error if the directory walk itself fails (e.g. the directory
/// does not exist or is unreadable).
pub fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry
            .with_context(|| format!("Failed to scan directory: {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
