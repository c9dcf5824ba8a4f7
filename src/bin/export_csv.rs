//! One-shot flat export: aggregate the configured sitemaps and write the
//! catalog as CSV to the given path, or stdout when no path is given.
//!
//! Usage: `cargo run --bin export_csv -- [output.csv]`

use std::fs::File;
use std::io;

use sitemap_scout::ingest::SitemapIngestor;
use sitemap_scout::{aggregate, config, export, query};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let sources = config::load_sources_default()?;
    let ingestor = SitemapIngestor::new()?;
    let result = aggregate::aggregate(&ingestor, &sources).await;

    for report in &result.reports {
        if !report.status.is_ok() {
            tracing::warn!(source = %report.label, status = ?report.status, "source skipped");
        }
    }

    let mut records = result.records;
    query::sort_newest_first(&mut records);

    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::create(&path)?;
            export::write_csv(&records, file)?;
            println!("wrote {} records to {}", records.len(), path);
        }
        None => export::write_csv(&records, io::stdout().lock())?,
    }
    Ok(())
}
