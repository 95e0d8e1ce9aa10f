//! Raw detail-table extraction from a mode panel.

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::dom::{self, mode_panel, own_text};
use crate::error::{Error, Result};
use crate::mode::GameMode;

/// A scraped table: header names plus data rows of raw cell strings, in
/// source order. Cells still carry thousands separators and "-" markers;
/// that cleanup belongs to the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn extract_mode_table(html: &str, mode: GameMode) -> Result<RawTable> {
    let doc = Html::parse_document(html);
    let panel = mode_panel(&doc, mode)?;
    let table = panel.select(&dom::DATA_TABLE).next().ok_or_else(|| {
        Error::Extraction(format!("{} detail table not found", mode.as_str()))
    })?;

    let mut rows: Vec<Vec<String>> = table
        .select(&dom::ROW)
        .map(|tr| tr.select(&dom::CELL).map(own_text).collect())
        .collect();

    if let Some(prefixes) = mode.spec().header_prefixes {
        // Row 0 is the section qualifier row (Normal / Final / Total). Drop
        // it and fold the qualifiers into the real header row underneath so
        // repeated base names stay distinct.
        if rows.len() < 2 {
            return Err(Error::Extraction(format!(
                "{} table is missing its header rows",
                mode.as_str()
            )));
        }
        rows.remove(0);
        for (i, cell) in rows[0].iter_mut().enumerate() {
            let prefix = prefixes.get(i).copied().unwrap_or("");
            *cell = format!("{prefix}{cell}");
        }
    }

    let mut iter = rows.into_iter();
    let headers = iter
        .next()
        .ok_or_else(|| Error::Extraction(format!("{} table is empty", mode.as_str())))?;
    Ok(RawTable {
        headers,
        rows: iter.collect(),
    })
}
