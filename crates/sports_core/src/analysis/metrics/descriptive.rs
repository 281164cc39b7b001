//! Basic descriptive statistics over numeric columns.

use crate::models::{Column, EnrichedTable};
use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// True when every value equals the first (or there are none).
///
/// Checked directly rather than through a computed variance, which can come
/// out as a tiny non-zero number for a constant column.
pub fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// Sample standard deviation (n - 1), `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Present values only, in order.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

/// Per-column summary for the overview view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: Column,
    /// Present values
    pub count: usize,
    /// Blank or unparseable cells, excluded from every statistic
    pub missing: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    pub fn from_values(column: Column, cells: &[Option<f64>]) -> Self {
        let values = present(cells);
        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);
        Self {
            column,
            count: values.len(),
            missing: cells.len() - values.len(),
            mean: mean(&values),
            std_dev: sample_std_dev(&values),
            min,
            max,
        }
    }
}

/// Summaries for the given columns, in the given order.
pub fn summarize(table: &EnrichedTable, columns: &[Column]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .map(|&column| ColumnSummary::from_values(column, &table.column_values(column)))
        .collect()
}
