// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "SITEMAP_SOURCES_PATH";
const DEFAULT_PATH: &str = "config/sources.toml";

/// One configured sitemap: a human-readable label plus the document URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapSource {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SourcesFile {
    #[serde(default)]
    sources: Vec<SitemapSource>,
}

/// Load sources from an explicit TOML path.
pub fn load_sources_from(path: &Path) -> Result<Vec<SitemapSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    parse_sources(&content)
}

/// Load sources using env var + fallbacks:
/// 1) $SITEMAP_SOURCES_PATH
/// 2) config/sources.toml
/// 3) built-in default list
pub fn load_sources_default() -> Result<Vec<SitemapSource>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        }
        return Err(anyhow!("SITEMAP_SOURCES_PATH points to non-existent path"));
    }
    let default = PathBuf::from(DEFAULT_PATH);
    if default.exists() {
        return load_sources_from(&default);
    }
    Ok(builtin_sources())
}

/// The blogs the tool was originally written around; used when no config
/// file is present.
pub fn builtin_sources() -> Vec<SitemapSource> {
    [
        ("Kevin R Chant", "https://www.kevinrchant.com/post-sitemap.xml"),
        ("Data Mozart", "https://data-mozart.com/post-sitemap.xml"),
        ("Crossjoin", "https://blog.crossjoin.co.uk/sitemap-1.xml"),
        ("Thomas Leblanc", "https://thomas-leblanc.com/sitemap-1.xml"),
    ]
    .into_iter()
    .map(|(label, url)| SitemapSource {
        label: label.to_string(),
        url: url.to_string(),
    })
    .collect()
}

fn parse_sources(s: &str) -> Result<Vec<SitemapSource>> {
    let file: SourcesFile = toml::from_str(s).context("parsing sources toml")?;
    let mut out = Vec::with_capacity(file.sources.len());
    for src in file.sources {
        let label = src.label.trim().to_string();
        let url = src.url.trim().to_string();
        if label.is_empty() || url.is_empty() {
            continue;
        }
        out.push(SitemapSource { label, url });
    }
    Ok(out)
}
