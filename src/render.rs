//! Plain-text rendering of the structured results, plus the transport
//! chunking the original front end applied to long tables.

use crate::compare::ComparisonResult;
use crate::normalize::NumericTable;
use crate::records::StatRecord;

/// Legacy transport limit: long output is split into chunks of at most this
/// many characters.
pub const MESSAGE_CHUNK_CHARS: usize = 1000;

pub fn render_record(record: &StatRecord) -> String {
    let width = record
        .fields
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (name, value) in &record.fields {
        out.push_str(&format!("{name:<width$}  {value}\n"));
    }
    out
}

pub fn render_numeric_table(table: &NumericTable) -> String {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(table.rows.len() + 1);
    let mut header = vec![table.label_column.clone()];
    header.extend(table.columns.iter().cloned());
    cells.push(header);
    for (label, row) in table.labels.iter().zip(&table.rows) {
        let mut line = vec![label.clone()];
        line.extend(row.iter().map(|v| format_value(*v)));
        cells.push(line);
    }
    render_grid(&cells)
}

pub fn render_comparison(result: &ComparisonResult) -> String {
    let cells: Vec<Vec<String>> = result
        .entries
        .iter()
        .map(|(name, grade)| vec![name.clone(), format_value(*grade)])
        .collect();
    render_grid(&cells)
}

/// Split at character boundaries so a chunk never exceeds the transport
/// limit regardless of multibyte content.
pub fn chunk_output(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == MESSAGE_CHUNK_CHARS {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "-".to_string()
    } else if (v - v.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn render_grid(rows: &[Vec<String>]) -> String {
    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; col_count];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.push_str(cell);
            if i + 1 < row.len() {
                line.push_str(&" ".repeat(pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_respect_the_transport_limit() {
        let text = "x".repeat(2_500);
        let chunks = chunk_output(&text);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MESSAGE_CHUNK_CHARS));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn short_output_is_a_single_chunk() {
        assert_eq!(chunk_output("hello"), vec!["hello".to_string()]);
    }

    #[test]
    fn grid_columns_line_up() {
        let rendered = render_grid(&[
            vec!["Mode".into(), "Kills".into()],
            vec!["Solo Insane".into(), "2310".into()],
        ]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0].find("Kills"), lines[1].find("2310"));
    }
}
