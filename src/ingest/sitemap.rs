// src/ingest/sitemap.rs
//
// Namespace-tolerant sitemap parsing. Providers disagree on whether the
// urlset carries the sitemaps.org namespace, so the namespace is resolved
// once from the root element and required of every lookup in that document
// instead of being hard-coded.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use metrics::counter;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::ingest::types::{LastModified, SitemapEntry};

/// Child of a `<url>` element currently being read.
enum Field {
    Loc,
    Lastmod,
}

/// Parse one sitemap document into entries, in document order.
///
/// Entries without a `<loc>` are skipped; their siblings are still
/// processed. An unparseable `<lastmod>` marks the entry invalid rather
/// than dropping it.
pub fn parse_sitemap(xml: &str) -> Result<Vec<SitemapEntry>> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Namespace of the root element, owned so it survives buffer reuse.
    // None means the document is unnamespaced.
    let mut root_ns: Option<Vec<u8>> = None;
    let mut seen_root = false;

    let mut entries = Vec::new();
    let mut in_url = false;
    let mut field: Option<Field> = None;
    let mut loc = String::new();
    let mut lastmod: Option<String> = None;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .context("reading sitemap xml")?;
        match event {
            Event::Start(e) => {
                if !seen_root {
                    seen_root = true;
                    if let ResolveResult::Bound(b) = &ns {
                        root_ns = Some(b.0.to_vec());
                    }
                    continue;
                }
                if !ns_matches(&ns, root_ns.as_deref()) {
                    continue;
                }
                let local = e.local_name();
                if local.as_ref() == b"url" {
                    in_url = true;
                    loc.clear();
                    lastmod = None;
                } else if in_url && local.as_ref() == b"loc" {
                    field = Some(Field::Loc);
                } else if in_url && local.as_ref().eq_ignore_ascii_case(b"lastmod") {
                    // Some providers emit LastMod.
                    field = Some(Field::Lastmod);
                }
            }
            Event::Text(t) => {
                if in_url {
                    let text = t.unescape().context("decoding sitemap text")?;
                    append_field(&mut field, &mut loc, &mut lastmod, &text);
                }
            }
            Event::CData(c) => {
                if in_url {
                    let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    append_field(&mut field, &mut loc, &mut lastmod, &text);
                }
            }
            Event::End(e) => {
                let local = e.local_name();
                if local.as_ref() == b"loc" || local.as_ref().eq_ignore_ascii_case(b"lastmod") {
                    field = None;
                } else if local.as_ref() == b"url" && in_url {
                    in_url = false;
                    let url = loc.trim().to_string();
                    if url.is_empty() {
                        counter!("sitemap_entries_skipped_total").increment(1);
                        continue;
                    }
                    let last_modified = match lastmod.take() {
                        Some(raw) => parse_lastmod(&raw),
                        None => LastModified::NotProvided,
                    };
                    entries.push(SitemapEntry { url, last_modified });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    counter!("sitemap_records_total").increment(entries.len() as u64);
    Ok(entries)
}

fn append_field(
    field: &mut Option<Field>,
    loc: &mut String,
    lastmod: &mut Option<String>,
    text: &str,
) {
    match field {
        Some(Field::Loc) => loc.push_str(text),
        Some(Field::Lastmod) => lastmod.get_or_insert_with(String::new).push_str(text),
        None => {}
    }
}

fn ns_matches(ns: &ResolveResult, root: Option<&[u8]>) -> bool {
    match (ns, root) {
        (ResolveResult::Bound(b), Some(r)) => b.0 == r,
        (ResolveResult::Unbound, None) => true,
        _ => false,
    }
}

/// Flexible `<lastmod>` parsing. Accepts RFC 3339 timestamps, naive
/// datetimes (assumed UTC), and bare dates. Bare dates normalize to
/// midnight UTC so mixed-precision documents sort consistently.
pub fn parse_lastmod(raw: &str) -> LastModified {
    let t = raw.trim();
    if t.is_empty() {
        return LastModified::NotProvided;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return LastModified::At(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S") {
        return LastModified::At(ndt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return LastModified::At(d.and_time(NaiveTime::MIN).and_utc());
    }
    LastModified::Invalid(t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn lastmod_date_only_normalizes_to_midnight_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_lastmod("2023-06-01"), LastModified::At(expected));
        assert_eq!(
            parse_lastmod("2023-06-01T00:00:00Z"),
            LastModified::At(expected)
        );
    }

    #[test]
    fn lastmod_offset_converts_to_utc() {
        let got = parse_lastmod("2022-03-15T10:30:00+02:00");
        let expected = Utc.with_ymd_and_hms(2022, 3, 15, 8, 30, 0).unwrap();
        assert_eq!(got, LastModified::At(expected));
    }

    #[test]
    fn lastmod_garbage_stays_visible() {
        assert_eq!(
            parse_lastmod("not-a-date"),
            LastModified::Invalid("not-a-date".to_string())
        );
    }

    #[test]
    fn lastmod_blank_is_not_provided() {
        assert_eq!(parse_lastmod("   "), LastModified::NotProvided);
    }

    #[test]
    fn prefixed_namespace_still_parses() {
        let xml = r#"<?xml version="1.0"?>
            <sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sm:url><sm:loc>https://a.test/x/</sm:loc></sm:url>
            </sm:urlset>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://a.test/x/");
    }

    #[test]
    fn cdata_loc_is_read() {
        let xml = r#"<urlset><url><loc><![CDATA[https://a.test/cdata/]]></loc></url></urlset>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://a.test/cdata/");
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        assert!(parse_sitemap("<urlset><url></urlset>").is_err());
    }
}
