// src/ingest/types.rs
use chrono::{DateTime, Utc};

/// Normalized `<lastmod>` value. Raw source-specific formats never leave the
/// ingestor; a value that cannot be parsed stays visibly invalid instead of
/// being coerced to a wrong date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LastModified {
    At(DateTime<Utc>),
    NotProvided,
    Invalid(String),
}

impl LastModified {
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            LastModified::At(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl std::fmt::Display for LastModified {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastModified::At(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            }
            LastModified::NotProvided => f.write_str("Not provided"),
            LastModified::Invalid(raw) => write!(f, "Invalid: {raw}"),
        }
    }
}

/// One `<url>` entry as emitted by the ingestor. Source-agnostic; the
/// aggregator attaches the label.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: LastModified,
}

impl SitemapEntry {
    pub fn labeled(self, label: &str) -> PageRecord {
        PageRecord {
            url: self.url,
            last_modified: self.last_modified,
            source_label: label.to_string(),
        }
    }
}

/// A labeled catalog record. Immutable once created; aggregation only adds
/// the label, never rewrites `url` or `last_modified`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub last_modified: LastModified,
    pub source_label: String,
}

/// Per-source outcome, surfaced alongside the records so callers can tell
/// "nothing matched" apart from "every source failed".
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok { records: usize },
    TransportError { detail: String },
    HttpStatus { code: u16 },
    ParseError { detail: String },
}

impl SourceStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, SourceStatus::Ok { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceReport {
    pub label: String,
    pub url: String,
    pub status: SourceStatus,
}

/// What one sitemap URL produced: zero or more entries plus a status.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub entries: Vec<SitemapEntry>,
    pub status: SourceStatus,
}

impl IngestOutcome {
    pub fn failed(status: SourceStatus) -> Self {
        Self {
            entries: Vec::new(),
            status,
        }
    }
}

#[async_trait::async_trait]
pub trait Ingest: Send + Sync {
    /// Never fails past its own boundary: transport and parse errors degrade
    /// to an empty entry list plus a reportable status.
    async fn ingest(&self, source_url: &str) -> IngestOutcome;
}
