//! Converts a raw scraped table into numeric form.
//!
//! Missing-value rule, fixed here and relied on by tests: a "-" or empty
//! cell becomes NaN and stays NaN in the table; every sum over cells
//! (the Overall row and the grade row sums) skips NaN terms, and a column
//! with no real values sums to 0.0.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mode::GameMode;
use crate::tables::RawTable;

pub const OVERALL_LABEL: &str = "Overall";

/// Named numeric columns plus one label column. The last row is always the
/// synthetic "Overall" aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericTable {
    pub label_column: String,
    pub labels: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

pub fn normalize(raw: &RawTable, mode: GameMode) -> Result<NumericTable> {
    let spec = mode.spec();

    let mut label_idx = None;
    let mut keep: Vec<usize> = Vec::new();
    for (i, header) in raw.headers.iter().enumerate() {
        if label_idx.is_none() && header == spec.label_column {
            label_idx = Some(i);
        } else if !spec.dropped_columns.contains(&header.as_str()) {
            keep.push(i);
        }
    }
    let label_idx = label_idx.ok_or_else(|| {
        Error::Extraction(format!(
            "label column {:?} not found in {} table",
            spec.label_column,
            mode.as_str()
        ))
    })?;

    let columns: Vec<String> = keep.iter().map(|&i| raw.headers[i].clone()).collect();
    let mut labels = Vec::with_capacity(raw.rows.len() + 1);
    let mut rows = Vec::with_capacity(raw.rows.len() + 1);
    for (r, raw_row) in raw.rows.iter().enumerate() {
        labels.push(raw_row.get(label_idx).cloned().unwrap_or_default());
        let mut out = Vec::with_capacity(keep.len());
        for &i in &keep {
            // A short row is padded with missing cells, same as a blank.
            let cell = raw_row.get(i).map(String::as_str).unwrap_or("");
            let value = parse_cell(cell).map_err(|value| Error::Normalization {
                column: raw.headers[i].clone(),
                row: r,
                value,
            })?;
            out.push(value);
        }
        rows.push(out);
    }

    // Column-wise sums; ratio columns are summed directly on purpose, the
    // aggregate mirrors the output semantics rather than a re-derived ratio.
    let overall: Vec<f64> = (0..columns.len())
        .map(|c| nan_sum(rows.iter().map(|row| row[c])))
        .collect();
    labels.push(OVERALL_LABEL.to_string());
    rows.push(overall);

    Ok(NumericTable {
        label_column: spec.label_column.to_string(),
        labels,
        columns,
        rows,
    })
}

/// "-" and "" are missing-value markers, never zeros. Anything else must be
/// numeric once thousands separators are stripped.
fn parse_cell(raw: &str) -> std::result::Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(f64::NAN);
    }
    let cleaned = trimmed.replace(',', "");
    cleaned.parse::<f64>().map_err(|_| raw.to_string())
}

/// Sum skipping NaN terms; all-NaN input sums to 0.0.
pub fn nan_sum(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| !v.is_nan()).sum()
}
