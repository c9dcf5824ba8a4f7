//! Sitemap catalog service — binary entrypoint.
//! Aggregates the configured sitemaps once at boot, then serves the
//! searchable catalog over HTTP (see `README.md` for routes).

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitemap_scout::api::{self, AppState};
use sitemap_scout::config;
use sitemap_scout::ingest::SitemapIngestor;
use sitemap_scout::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sitemap_scout=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op elsewhere.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Recorder must exist before the first ingest counters fire.
    let metrics = Metrics::init();

    let sources = config::load_sources_default()?;
    if sources.is_empty() {
        tracing::warn!("no sitemap sources configured; catalog will stay empty");
    }

    let ingestor = Arc::new(SitemapIngestor::new()?);
    let state = AppState::new(ingestor, sources);

    let summary = state.refresh().await;
    tracing::info!(?summary, "initial aggregation finished");

    let router = api::create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
