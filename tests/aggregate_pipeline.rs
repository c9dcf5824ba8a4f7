// tests/aggregate_pipeline.rs
//
// Aggregation over mock ingestors: label stamping, order, and partial
// failure. A source that 404s or fails transport must not affect the rest.

use std::collections::HashMap;

use async_trait::async_trait;
use sitemap_scout::aggregate::aggregate;
use sitemap_scout::{
    Ingest, IngestOutcome, LastModified, SitemapEntry, SitemapSource, SourceStatus,
};

struct MockIngestor {
    by_url: HashMap<String, IngestOutcome>,
}

#[async_trait]
impl Ingest for MockIngestor {
    async fn ingest(&self, source_url: &str) -> IngestOutcome {
        self.by_url
            .get(source_url)
            .cloned()
            .unwrap_or_else(|| IngestOutcome::failed(SourceStatus::HttpStatus { code: 404 }))
    }
}

fn entry(url: &str) -> SitemapEntry {
    SitemapEntry {
        url: url.to_string(),
        last_modified: LastModified::NotProvided,
    }
}

fn ok_outcome(urls: &[&str]) -> IngestOutcome {
    IngestOutcome {
        entries: urls.iter().map(|u| entry(u)).collect(),
        status: SourceStatus::Ok {
            records: urls.len(),
        },
    }
}

fn source(label: &str, url: &str) -> SitemapSource {
    SitemapSource {
        label: label.to_string(),
        url: url.to_string(),
    }
}

#[tokio::test]
async fn records_are_stamped_and_ordered_by_source_then_document() {
    let ingestor = MockIngestor {
        by_url: HashMap::from([
            (
                "https://a.test/sitemap.xml".to_string(),
                ok_outcome(&["https://a.test/1/", "https://a.test/2/"]),
            ),
            (
                "https://b.test/sitemap.xml".to_string(),
                ok_outcome(&["https://b.test/1/"]),
            ),
        ]),
    };
    let sources = [
        source("A", "https://a.test/sitemap.xml"),
        source("B", "https://b.test/sitemap.xml"),
    ];

    let agg = aggregate(&ingestor, &sources).await;
    assert_eq!(agg.records.len(), 3);
    let got: Vec<(&str, &str)> = agg
        .records
        .iter()
        .map(|r| (r.source_label.as_str(), r.url.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            ("A", "https://a.test/1/"),
            ("A", "https://a.test/2/"),
            ("B", "https://b.test/1/"),
        ]
    );
}

#[tokio::test]
async fn failed_source_contributes_nothing_but_is_reported() {
    let ingestor = MockIngestor {
        by_url: HashMap::from([(
            "https://a.test/sitemap.xml".to_string(),
            ok_outcome(&["https://a.test/1/"]),
        )]),
    };
    let sources = [
        source("A", "https://a.test/sitemap.xml"),
        source("B", "https://b.test/missing-sitemap.xml"),
    ];

    let agg = aggregate(&ingestor, &sources).await;
    assert_eq!(agg.records.len(), 1);
    assert!(agg.records.iter().all(|r| r.source_label == "A"));

    assert_eq!(agg.reports.len(), 2);
    assert_eq!(agg.sources_ok(), 1);
    assert_eq!(agg.reports[1].label, "B");
    assert_eq!(
        agg.reports[1].status,
        SourceStatus::HttpStatus { code: 404 }
    );
}

#[tokio::test]
async fn all_sources_failing_is_distinguishable_from_no_match() {
    let ingestor = MockIngestor {
        by_url: HashMap::new(),
    };
    let sources = [source("A", "https://a.test/sitemap.xml")];

    let agg = aggregate(&ingestor, &sources).await;
    assert!(agg.records.is_empty());
    assert_eq!(agg.sources_ok(), 0);
    assert!(agg.reports.iter().all(|r| !r.status.is_ok()));
}
