//! Parsers for malformed multi-object JSON export files
//!
//! # Error Handling Strategy
//!
//! This module follows a **best-effort recovery** approach suitable for dirty
//! source data:
//!
//! - **Whole-buffer decode failure**: Expected, not an error. A file that isn't
//!   a single valid JSON value falls through to the character-scanning
//!   segmenter with no message and no log.
//!
//! - **Per-span decode failure**: A balanced-brace span that still fails to
//!   decode is dropped silently and parsing continues with the remainder of
//!   the input. The drop is counted in [`ParseOutcome::skipped_spans`] so
//!   callers can assess data loss: the emitted document count is a lower
//!   bound on the true record count, and batch tools should compare it
//!   against independent totals when completeness matters.
//!
//! - **No raising**: The segmenter never returns an error for malformed input.
//!   Hard failures (unreadable files) belong to the loader, one level up, and
//!   are isolated per file there.

pub mod segment;

pub use segment::{ParseOutcome, parse_concatenated};
