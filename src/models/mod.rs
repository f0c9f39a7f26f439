//! Output document models for the restructured collections.
//!
//! These are the documents the restructurer writes: deduplicated movie and
//! series catalogs plus simplified invoices that reference them by id. Input
//! documents stay as raw `serde_json::Value` because the source data is too
//! dirty for strict typing; only the rewritten output is typed.

pub mod content;
pub mod invoice;

pub use content::{CastMember, ContentMetadata, Movie, MovieCast, MovieDetails, Series};
pub use invoice::{
    ClientSummary, ContractSummary, MovieViewing, ProductSummary, RestructureMetadata,
    RestructuredInvoice, SeriesViewing,
};
