// src/query.rs
//! Pure filtering and ordering over aggregated records. Rendering is the
//! caller's concern; nothing here mutates a record.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::ingest::types::PageRecord;
use crate::title::display_title;

/// Return the records matching an optional case-insensitive text query
/// (against the URL or its derived title) and an optional label set.
///
/// A missing or blank query and a missing or **empty** label set both mean
/// "no restriction", never an empty result.
pub fn filter(
    records: &[PageRecord],
    text_query: Option<&str>,
    labels: Option<&HashSet<String>>,
) -> Vec<PageRecord> {
    let query = text_query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let labels = labels.filter(|set| !set.is_empty());

    records
        .iter()
        .filter(|r| {
            let text_hit = match &query {
                Some(q) => {
                    r.url.to_lowercase().contains(q)
                        || display_title(&r.url).to_lowercase().contains(q)
                }
                None => true,
            };
            let label_hit = labels.map_or(true, |set| set.contains(&r.source_label));
            text_hit && label_hit
        })
        .cloned()
        .collect()
}

/// Newest first; records without a usable date sort last, original order
/// preserved among equals.
pub fn sort_newest_first(records: &mut [PageRecord]) {
    records.sort_by_key(|r| Reverse(r.last_modified.as_datetime()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::LastModified;
    use chrono::{TimeZone, Utc};

    fn rec(url: &str, label: &str, lastmod: LastModified) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            last_modified: lastmod,
            source_label: label.to_string(),
        }
    }

    #[test]
    fn sort_puts_undated_records_last() {
        let dated = |y| LastModified::At(Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap());
        let mut records = vec![
            rec("https://a.test/old/", "A", dated(2019)),
            rec("https://a.test/none/", "A", LastModified::NotProvided),
            rec("https://a.test/new/", "A", dated(2023)),
            rec("https://a.test/bad/", "A", LastModified::Invalid("x".into())),
        ];
        sort_newest_first(&mut records);
        assert_eq!(records[0].url, "https://a.test/new/");
        assert_eq!(records[1].url, "https://a.test/old/");
        // stable: undated records keep their relative order at the tail
        assert_eq!(records[2].url, "https://a.test/none/");
        assert_eq!(records[3].url, "https://a.test/bad/");
    }
}
