// src/aggregate.rs
use crate::config::SitemapSource;
use crate::ingest::types::{Ingest, PageRecord, SourceReport, SourceStatus};

/// Everything one aggregation pass produced: the merged record list plus one
/// report per configured source, in configuration order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Aggregate {
    pub records: Vec<PageRecord>,
    pub reports: Vec<SourceReport>,
}

impl Aggregate {
    pub fn sources_ok(&self) -> usize {
        self.reports.iter().filter(|r| r.status.is_ok()).count()
    }
}

/// Ingest every configured source in order and stamp each entry with its
/// source label. Per-source order is preserved within the concatenation.
/// A failed source contributes zero records and a non-ok report; the other
/// sources are unaffected.
pub async fn aggregate<I: Ingest + ?Sized>(ingestor: &I, sources: &[SitemapSource]) -> Aggregate {
    let mut records = Vec::new();
    let mut reports = Vec::with_capacity(sources.len());

    for src in sources {
        let outcome = ingestor.ingest(&src.url).await;
        match &outcome.status {
            SourceStatus::Ok { records: n } => {
                tracing::info!(source = %src.label, records = *n, "sitemap ingested");
            }
            status => {
                tracing::warn!(source = %src.label, status = ?status, "source contributed no records");
            }
        }
        records.extend(outcome.entries.into_iter().map(|e| e.labeled(&src.label)));
        reports.push(SourceReport {
            label: src.label.clone(),
            url: src.url.clone(),
            status: outcome.status,
        });
    }

    Aggregate { records, reports }
}
