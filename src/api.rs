use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;

use crate::aggregate::{self, Aggregate};
use crate::config::SitemapSource;
use crate::ingest::types::{Ingest, PageRecord, SourceReport};
use crate::query;
use crate::title::display_title;

/// Snapshot of the last aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub records: Vec<PageRecord>,
    pub reports: Vec<SourceReport>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<Catalog>>,
    ingestor: Arc<dyn Ingest>,
    sources: Arc<Vec<SitemapSource>>,
}

impl AppState {
    pub fn new(ingestor: Arc<dyn Ingest>, sources: Vec<SitemapSource>) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog::default())),
            ingestor,
            sources: Arc::new(sources),
        }
    }

    /// Run one aggregation pass and swap in the new catalog snapshot.
    pub async fn refresh(&self) -> RefreshSummary {
        let Aggregate {
            mut records,
            reports,
        } = aggregate::aggregate(self.ingestor.as_ref(), &self.sources).await;
        query::sort_newest_first(&mut records);

        let summary = RefreshSummary {
            records: records.len(),
            sources_ok: reports.iter().filter(|r| r.status.is_ok()).count(),
            sources_total: reports.len(),
        };

        let mut guard = self.catalog.write().expect("rwlock poisoned");
        *guard = Catalog {
            records,
            reports,
            refreshed_at: Some(Utc::now()),
        };
        summary
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/articles", get(articles))
        .route("/sources", get(sources_report))
        .route("/refresh", post(refresh))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize, Default)]
struct ArticlesParams {
    /// Case-insensitive substring match against URL or derived title.
    q: Option<String>,
    /// Comma-separated source labels; absent or blank means all sources.
    site: Option<String>,
}

#[derive(serde::Serialize)]
struct ArticleRow {
    article: String,
    url: String,
    last_modified: String,
    website: String,
}

#[derive(serde::Serialize)]
struct ArticlesResp {
    total: usize,
    articles: Vec<ArticleRow>,
}

async fn articles(
    State(state): State<AppState>,
    Query(params): Query<ArticlesParams>,
) -> Json<ArticlesResp> {
    let labels: Option<HashSet<String>> = params.site.as_deref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    });

    let matched = {
        let guard = state.catalog.read().expect("rwlock poisoned");
        query::filter(&guard.records, params.q.as_deref(), labels.as_ref())
    };

    let articles = matched
        .into_iter()
        .map(|r| ArticleRow {
            article: display_title(&r.url),
            last_modified: r.last_modified.to_string(),
            website: r.source_label,
            url: r.url,
        })
        .collect::<Vec<_>>();

    Json(ArticlesResp {
        total: articles.len(),
        articles,
    })
}

#[derive(serde::Serialize)]
struct SourcesResp {
    refreshed_at: Option<DateTime<Utc>>,
    sources: Vec<SourceReport>,
}

async fn sources_report(State(state): State<AppState>) -> Json<SourcesResp> {
    let guard = state.catalog.read().expect("rwlock poisoned");
    Json(SourcesResp {
        refreshed_at: guard.refreshed_at,
        sources: guard.reports.clone(),
    })
}

#[derive(Debug, serde::Serialize)]
pub struct RefreshSummary {
    pub records: usize,
    pub sources_ok: usize,
    pub sources_total: usize,
}

async fn refresh(State(state): State<AppState>) -> Json<RefreshSummary> {
    Json(state.refresh().await)
}
