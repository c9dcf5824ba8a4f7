// src/ingest/mod.rs
pub mod sitemap;
pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::ingest::types::{Ingest, IngestOutcome, SourceStatus};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "sitemap_records_total",
            "Entries parsed out of sitemap documents."
        );
        describe_counter!(
            "sitemap_entries_skipped_total",
            "Sitemap entries dropped for lacking <loc>."
        );
        describe_counter!(
            "sitemap_fetch_errors_total",
            "Sitemap fetch failures (transport or HTTP status)."
        );
        describe_counter!(
            "sitemap_parse_errors_total",
            "Sitemap documents that failed XML parsing."
        );
        describe_histogram!(
            "sitemap_ingest_ms",
            "Per-source fetch+parse time in milliseconds."
        );
    });
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches one sitemap document over HTTP and turns it into normalized
/// entries. Repeated calls against unchanged remote content yield the same
/// entries.
pub struct SitemapIngestor {
    client: reqwest::Client,
}

impl SitemapIngestor {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("sitemap-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Ingest for SitemapIngestor {
    async fn ingest(&self, source_url: &str) -> IngestOutcome {
        ensure_metrics_described();
        let t0 = std::time::Instant::now();

        let resp = match self.client.get(source_url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = ?e, url = source_url, "sitemap fetch failed");
                counter!("sitemap_fetch_errors_total").increment(1);
                return IngestOutcome::failed(SourceStatus::TransportError {
                    detail: e.to_string(),
                });
            }
        };

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, url = source_url, "sitemap fetch returned non-success");
            counter!("sitemap_fetch_errors_total").increment(1);
            return IngestOutcome::failed(SourceStatus::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = ?e, url = source_url, "sitemap body read failed");
                counter!("sitemap_fetch_errors_total").increment(1);
                return IngestOutcome::failed(SourceStatus::TransportError {
                    detail: e.to_string(),
                });
            }
        };

        let entries = match sitemap::parse_sitemap(&body) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = ?e, url = source_url, "sitemap parse failed");
                counter!("sitemap_parse_errors_total").increment(1);
                return IngestOutcome::failed(SourceStatus::ParseError {
                    detail: e.to_string(),
                });
            }
        };

        histogram!("sitemap_ingest_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        IngestOutcome {
            status: SourceStatus::Ok {
                records: entries.len(),
            },
            entries,
        }
    }
}
