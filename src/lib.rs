//! streamit-migrate - one-off migration utilities for the streamit billing dataset
//!
//! The source data is an old video-streaming billing dump: directories of
//! `.json` files in mixed encodings, each holding many invoice objects written
//! back to back with no separators. This crate collects the tools used to get
//! that data into an importable shape:
//!
//! - Segmenting malformed multi-object files into individual documents
//! - Converting dump files into valid JSON array files
//! - Profiling data quality across the parsed document stream
//! - Extracting movie/series catalogs and rewriting invoices with references
//!
//! # Example
//!
//! ```
//! use streamit_migrate::parsers::parse_concatenated;
//!
//! let outcome = parse_concatenated(r#"{"_id": "A"}{"_id": "B"}"#);
//! assert_eq!(outcome.documents.len(), 2);
//! ```

pub mod cli;
pub mod convert;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod profiler;
pub mod restructure;

// Re-export commonly used types
pub use convert::{ConvertSummary, convert_dir, convert_file};
pub use loader::{DecodedText, discover_json_files, read_text_file};
pub use parsers::{ParseOutcome, parse_concatenated};
pub use profiler::{QualityReport, profile, profile_dir};
pub use restructure::{ContentMap, extract_movies, extract_series, rewrite_invoices};
