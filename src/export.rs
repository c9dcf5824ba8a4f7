// src/export.rs
//! Flat CSV export of the aggregated catalog, one row per record.

use std::io::Write;

use anyhow::{Context, Result};

use crate::ingest::types::PageRecord;
use crate::title::display_title;

/// Write records as CSV with the original report layout:
/// `Article,URL,Last Modified,Website`. Dates render through the explicit
/// markers ("Not provided", "Invalid: ...") rather than blank cells.
pub fn write_csv<W: Write>(records: &[PageRecord], out: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["Article", "URL", "Last Modified", "Website"])
        .context("writing csv header")?;
    for r in records {
        let title = display_title(&r.url);
        let lastmod = r.last_modified.to_string();
        w.write_record([
            title.as_str(),
            r.url.as_str(),
            lastmod.as_str(),
            r.source_label.as_str(),
        ])
        .context("writing csv row")?;
    }
    w.flush().context("flushing csv output")?;
    Ok(())
}
