// src/lib.rs
// Public library surface for integration tests and the binaries.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod export;
pub mod ingest;
pub mod metrics;
pub mod query;
pub mod title;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::Aggregate;
pub use crate::api::create_router;
pub use crate::config::SitemapSource;
pub use crate::ingest::types::{
    Ingest, IngestOutcome, LastModified, PageRecord, SitemapEntry, SourceReport, SourceStatus,
};
pub use crate::ingest::SitemapIngestor;
