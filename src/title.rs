// src/title.rs
//! Human-readable titles derived from article URLs. Best effort: the slug is
//! presentation metadata, never guaranteed to match the page's real title.

use url::Url;

/// Derive a display title from the last path segment of a URL:
/// percent-decoded, separators to spaces, words capitalized.
/// Falls back to the host (or the raw input) when there is no usable slug.
pub fn display_title(page_url: &str) -> String {
    let Ok(parsed) = Url::parse(page_url) else {
        return page_url.to_string();
    };
    let slug = parsed
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or("");
    if slug.is_empty() {
        return parsed.host_str().unwrap_or(page_url).to_string();
    }
    let decoded = match urlencoding::decode(slug) {
        Ok(cow) => cow.into_owned(),
        Err(_) => slug.to_string(),
    };
    titlecase_words(&decoded)
}

fn titlecase_words(slug: &str) -> String {
    slug.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
