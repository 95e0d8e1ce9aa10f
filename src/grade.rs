//! The weighted-grade reduction: one scalar per table row.

use crate::mode::{GameMode, ModeSpec};
use crate::normalize::{NumericTable, nan_sum};

/// Apply the mode's linear weights and reduce each row to its Grade, in row
/// order. Columns without an explicit weight count at the mode's default;
/// NaN cells contribute nothing.
pub fn grade_rows(table: &NumericTable, mode: GameMode) -> Vec<f64> {
    let spec = mode.spec();
    let weights: Vec<f64> = table
        .columns
        .iter()
        .map(|column| weight_for(spec, column))
        .collect();
    table
        .rows
        .iter()
        .map(|row| nan_sum(row.iter().zip(&weights).map(|(v, w)| v * w)))
        .collect()
}

/// Grade of the synthetic Overall row, the scalar used for comparisons.
pub fn overall_grade(table: &NumericTable, mode: GameMode) -> Option<f64> {
    grade_rows(table, mode).last().copied()
}

fn weight_for(spec: &ModeSpec, column: &str) -> f64 {
    spec.weights
        .iter()
        .find(|(name, _)| *name == column)
        .map(|&(_, w)| w)
        .unwrap_or(spec.default_weight)
}
