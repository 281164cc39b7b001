//! # Correlation Module
//!
//! Pearson correlation between numeric columns of the enriched table.
//!
//! ## Undefined cells
//!
//! Pearson's r divides by both standard deviations, so it has no value when
//! either series is constant. Such cells are reported as
//! `CorrelationCell::Undefined` with the reason instead of NaN or 0.0, and
//! asking for their value yields `DashboardError::UndefinedCorrelation`.
//!
//! ## Missing cells
//!
//! Table columns can hold missing cells. Pairs where either side is missing
//! are dropped before computing, pair by pair, so one gap never removes a
//! row from unrelated coefficients.

use super::descriptive::{is_constant, mean, present};
use crate::error::{DashboardError, Result};
use crate::models::{Column, EnrichedTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Why a coefficient could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The named column holds a single repeated value
    ZeroVariance { column: String },
    /// Fewer than two rows
    InsufficientRows { rows: usize },
}

impl UndefinedReason {
    pub fn description(&self) -> String {
        match self {
            UndefinedReason::ZeroVariance { column } => {
                format!("column '{}' has zero variance", column)
            }
            UndefinedReason::InsufficientRows { rows } => {
                format!("{} row(s), at least 2 required", rows)
            }
        }
    }
}

/// A correlation coefficient or the reason it does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrelationCell {
    Defined { value: f64 },
    Undefined { reason: UndefinedReason },
}

impl CorrelationCell {
    pub fn is_defined(&self) -> bool {
        matches!(self, CorrelationCell::Defined { .. })
    }

    pub fn as_option(&self) -> Option<f64> {
        match self {
            CorrelationCell::Defined { value } => Some(*value),
            CorrelationCell::Undefined { .. } => None,
        }
    }

    /// The coefficient, or `UndefinedCorrelation` naming `label`.
    pub fn value(&self, label: &str) -> Result<f64> {
        match self {
            CorrelationCell::Defined { value } => Ok(*value),
            CorrelationCell::Undefined { reason } => Err(DashboardError::UndefinedCorrelation {
                column: label.to_string(),
                reason: reason.description(),
            }),
        }
    }
}

/// Pearson correlation of two equally long series.
///
/// Returns `Undefined` for fewer than two points or a constant series;
/// otherwise a value clamped to [-1, 1].
pub fn pearson(xs: &[f64], x_name: &str, ys: &[f64], y_name: &str) -> CorrelationCell {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len().min(ys.len());
    if n < 2 {
        return CorrelationCell::Undefined {
            reason: UndefinedReason::InsufficientRows { rows: n },
        };
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    for (values, name) in [(xs, x_name), (ys, y_name)] {
        if is_constant(values) {
            return CorrelationCell::Undefined {
                reason: UndefinedReason::ZeroVariance {
                    column: name.to_string(),
                },
            };
        }
    }

    // r is scale-invariant; scaling into [-1, 1] keeps the squared sums finite.
    let xs = scaled(xs);
    let ys = scaled(ys);

    // n >= 2, so both means exist
    let mx = mean(&xs).unwrap_or_default();
    let my = mean(&ys).unwrap_or_default();

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(&ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // non-constant and scaled, so 0 < var_x * var_y <= n^2
    let denom = (var_x * var_y).sqrt();
    CorrelationCell::Defined {
        value: (cov / denom).clamp(-1.0, 1.0),
    }
}

fn scaled(values: &[f64]) -> Vec<f64> {
    let max = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if max > 0.0 {
        values.iter().map(|v| v / max).collect()
    } else {
        values.to_vec()
    }
}

/// Pearson correlation over the rows where both cells are present.
pub fn pearson_pairwise(xs: &[Option<f64>], x_name: &str, ys: &[Option<f64>], y_name: &str) -> CorrelationCell {
    let (px, py): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();
    pearson(&px, x_name, &py, y_name)
}

/// Symmetric N×N matrix of pairwise correlations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    /// Row-major, `cells[i][j]` correlates `columns[i]` with `columns[j]`
    pub cells: Vec<Vec<CorrelationCell>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&CorrelationCell> {
        self.cells.get(i).and_then(|row| row.get(j))
    }

    /// Coefficient at (i, j); `UndefinedCorrelation` for a flagged cell and
    /// `ColumnNotFound` for an index outside the matrix.
    pub fn value(&self, i: usize, j: usize) -> Result<f64> {
        let cell = self.cell(i, j).ok_or_else(|| {
            DashboardError::column_not_found(format!("matrix index ({}, {})", i, j))
        })?;
        let label = format!("{} × {}", self.columns[i], self.columns[j]);
        cell.value(&label)
    }

    /// Coefficient looked up by column pair.
    pub fn between(&self, a: Column, b: Column) -> Result<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        self.value(i, j)
    }

    fn position(&self, column: Column) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .ok_or_else(|| DashboardError::column_not_found(column.name()))
    }

    /// Columns whose whole row/column is flagged (constant values).
    pub fn undefined_columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                self.cells[*i]
                    .iter()
                    .all(|cell| !cell.is_defined())
            })
            .map(|(_, c)| *c)
            .collect()
    }
}

/// Pairwise correlation matrix over `columns`, in the given order.
///
/// The diagonal is 1.0 for every non-constant column. A constant column has
/// its entire row and column (diagonal included) flagged undefined.
/// Off-diagonal cells use the rows where both columns are present.
pub fn correlate(table: &EnrichedTable, columns: &[Column]) -> CorrelationMatrix {
    let series: Vec<Vec<Option<f64>>> = columns.iter().map(|&c| table.column_values(c)).collect();
    let n = columns.len();

    let mut cells: Vec<Vec<CorrelationCell>> = vec![Vec::with_capacity(n); n];
    for i in 0..n {
        for j in 0..n {
            let cell = if j < i {
                cells[j][i].clone()
            } else if i == j {
                diagonal(&series[i], columns[i].name())
            } else {
                pearson_pairwise(&series[i], columns[i].name(), &series[j], columns[j].name())
            };
            cells[i].push(cell);
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        cells,
    }
}

fn diagonal(cells: &[Option<f64>], name: &str) -> CorrelationCell {
    let values = present(cells);
    if values.len() < 2 {
        CorrelationCell::Undefined {
            reason: UndefinedReason::InsufficientRows { rows: values.len() },
        }
    } else if is_constant(&values) {
        CorrelationCell::Undefined {
            reason: UndefinedReason::ZeroVariance {
                column: name.to_string(),
            },
        }
    } else {
        CorrelationCell::Defined { value: 1.0 }
    }
}

/// Resolve column names, then correlate.
pub fn correlate_by_name<S: AsRef<str>>(table: &EnrichedTable, names: &[S]) -> Result<CorrelationMatrix> {
    let columns = Column::parse_all(names)?;
    Ok(correlate(table, &columns))
}

/// One attribute's correlation with popularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityCorrelation {
    pub column: Column,
    pub coefficient: CorrelationCell,
}

/// Correlation of each column with `popularity_index`, ascending by
/// coefficient. Undefined entries follow all defined ones, in input order.
pub fn correlate_with_popularity(table: &EnrichedTable, columns: &[Column]) -> Vec<PopularityCorrelation> {
    let popularity = table.column_values(Column::PopularityIndex);
    let mut entries: Vec<PopularityCorrelation> = columns
        .iter()
        .map(|&column| PopularityCorrelation {
            column,
            coefficient: pearson_pairwise(
                &table.column_values(column),
                column.name(),
                &popularity,
                Column::PopularityIndex.name(),
            ),
        })
        .collect();

    // stable: equal coefficients and undefined entries keep input order
    entries.sort_by(|a, b| match (a.coefficient.as_option(), b.coefficient.as_option()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries
}

/// Resolve column names, then correlate with popularity.
pub fn correlate_with_popularity_by_name<S: AsRef<str>>(
    table: &EnrichedTable,
    names: &[S],
) -> Result<Vec<PopularityCorrelation>> {
    let columns = Column::parse_all(names)?;
    Ok(correlate_with_popularity(table, &columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, EnrichedRow, PopularitySource, SportRecord};
    use proptest::prelude::*;

    fn table_from(rows: &[(f64, f64, f64, f64)]) -> EnrichedTable {
        // (end, str, pwr, popularity)
        EnrichedTable::new(
            rows.iter()
                .enumerate()
                .map(|(i, &(end, strength, power, pop))| {
                    let mut skills = [1.0 + i as f64; Attribute::COUNT];
                    skills[Attribute::Endurance.index()] = end;
                    skills[Attribute::Strength.index()] = strength;
                    skills[Attribute::Power.index()] = power;
                    EnrichedRow {
                        record: SportRecord::new(format!("Sport {i}"), i as u32 + 1, 0.0, skills),
                        popularity_index: pop,
                        popularity_source: PopularitySource::Reference,
                    }
                })
                .collect(),
        )
    }

    const END: Column = Column::Skill(Attribute::Endurance);
    const STR: Column = Column::Skill(Attribute::Strength);
    const PWR: Column = Column::Skill(Attribute::Power);

    #[test]
    fn test_pearson_perfect_relationships() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert_eq!(pearson(&xs, "x", &up, "y").as_option(), Some(1.0));
        assert_eq!(pearson(&xs, "x", &down, "y").as_option(), Some(-1.0));
    }

    #[test]
    fn test_pearson_known_value() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 1.0, 4.0, 3.0, 5.0];
        let r = pearson(&xs, "x", &ys, "y").as_option().unwrap();
        assert!((r - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_undefined() {
        let cell = pearson(&[10.0, 10.0, 10.0], "end", &[1.0, 2.0, 3.0], "str");
        assert_eq!(
            cell,
            CorrelationCell::Undefined {
                reason: UndefinedReason::ZeroVariance {
                    column: "end".to_string()
                }
            }
        );
        match cell.value("end × str") {
            Err(DashboardError::UndefinedCorrelation { column, .. }) => assert_eq!(column, "end × str"),
            other => panic!("expected UndefinedCorrelation, got {other:?}"),
        }
    }

    #[test]
    fn test_pearson_large_values_do_not_overflow() {
        let xs = [0.0, 1e160, 2e160];
        let ys = [0.0, 1e160, 2e160];
        assert_eq!(pearson(&xs, "x", &ys, "y"), CorrelationCell::Defined { value: 1.0 });

        let down = [3e307, 2e307, -1e307];
        let r = pearson(&xs, "x", &down, "y").as_option().unwrap();
        assert!(r < -0.9 && r >= -1.0);
    }

    #[test]
    fn test_pairwise_drops_incomplete_pairs() {
        let xs = [Some(1.0), None, Some(2.0), Some(3.0)];
        let ys = [Some(2.0), Some(100.0), Some(4.0), None];
        // only rows 0 and 2 are complete
        assert_eq!(pearson_pairwise(&xs, "x", &ys, "y").as_option(), Some(1.0));

        let sparse = [Some(1.0), None, None, None];
        assert_eq!(
            pearson_pairwise(&xs, "x", &sparse, "y"),
            CorrelationCell::Undefined {
                reason: UndefinedReason::InsufficientRows { rows: 1 }
            }
        );
    }

    #[test]
    fn test_matrix_skips_missing_cells() {
        let mut rows = table_from(&[
            (1.0, 3.0, 2.0, 100.0),
            (2.0, 1.0, 4.0, 200.0),
            (3.0, 2.0, 5.0, 300.0),
            (4.0, 4.0, 9.0, 400.0),
        ])
        .rows()
        .to_vec();
        rows[1].record.skills[Attribute::Endurance.index()] = None;
        let table = EnrichedTable::new(rows);

        let matrix = correlate(&table, &[END, STR, PWR]);
        assert_eq!(matrix.value(0, 0).unwrap(), 1.0);
        let with_gap = pearson(&[1.0, 3.0, 4.0], "end", &[3.0, 2.0, 4.0], "str");
        assert_eq!(matrix.cell(0, 1), Some(&with_gap));
        // str × pwr still sees all four rows
        let full = pearson(&[3.0, 1.0, 2.0, 4.0], "str", &[2.0, 4.0, 5.0, 9.0], "pwr");
        assert_eq!(matrix.cell(1, 2), Some(&full));

        let entries = correlate_with_popularity(&table, &[END]);
        assert_eq!(entries[0].coefficient.as_option(), Some(1.0));
    }

    #[test]
    fn test_pearson_single_row_is_undefined() {
        let cell = pearson(&[1.0], "x", &[2.0], "y");
        assert_eq!(
            cell,
            CorrelationCell::Undefined {
                reason: UndefinedReason::InsufficientRows { rows: 1 }
            }
        );
    }

    #[test]
    fn test_matrix_identity_diagonal() {
        let table = table_from(&[
            (1.0, 3.0, 2.0, 100.0),
            (2.0, 1.0, 4.0, 200.0),
            (3.0, 2.0, 5.0, 300.0),
        ]);
        let matrix = correlate(&table, &[END, STR, PWR]);
        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_eq!(matrix.value(i, i).unwrap(), 1.0);
        }
        assert_eq!(matrix.value(0, 1).unwrap(), matrix.value(1, 0).unwrap());
    }

    #[test]
    fn test_constant_column_flags_row_and_column() {
        // every row has end = 10
        let table = table_from(&[
            (10.0, 3.0, 2.0, 100.0),
            (10.0, 1.0, 4.0, 200.0),
            (10.0, 2.0, 5.0, 300.0),
        ]);
        let matrix = correlate(&table, &[END, STR, PWR]);

        for k in 0..3 {
            assert!(!matrix.cell(0, k).unwrap().is_defined());
            assert!(!matrix.cell(k, 0).unwrap().is_defined());
        }
        assert!(matrix.cell(1, 2).unwrap().is_defined());
        assert_eq!(matrix.undefined_columns(), vec![END]);
        assert!(matches!(
            matrix.between(END, STR),
            Err(DashboardError::UndefinedCorrelation { .. })
        ));
    }

    #[test]
    fn test_correlate_by_name_rejects_unknown_column() {
        let table = table_from(&[(1.0, 2.0, 3.0, 4.0), (2.0, 3.0, 4.0, 5.0)]);
        let err = correlate_by_name(&table, &["end", "speediness"]).unwrap_err();
        assert_eq!(err.code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_popularity_correlation_sorted_ascending() {
        let table = table_from(&[
            (1.0, 4.0, 1.0, 100.0),
            (2.0, 3.0, 3.0, 200.0),
            (3.0, 2.0, 2.0, 300.0),
            (4.0, 1.0, 4.0, 400.0),
        ]);
        let entries = correlate_with_popularity(&table, &[END, STR, PWR]);
        let order: Vec<Column> = entries.iter().map(|e| e.column).collect();
        assert_eq!(order, vec![STR, PWR, END]);
        assert_eq!(entries[0].coefficient.as_option(), Some(-1.0));
        assert_eq!(entries[2].coefficient.as_option(), Some(1.0));
    }

    #[test]
    fn test_popularity_correlation_undefined_last() {
        let table = table_from(&[
            (7.0, 4.0, 1.0, 100.0),
            (7.0, 3.0, 3.0, 200.0),
            (7.0, 2.0, 2.0, 300.0),
        ]);
        let entries = correlate_with_popularity(&table, &[END, STR, PWR]);
        assert_eq!(entries.last().unwrap().column, END);
        assert!(!entries.last().unwrap().coefficient.is_defined());
    }

    #[test]
    fn test_popularity_correlation_by_name() {
        let table = table_from(&[
            (1.0, 4.0, 1.0, 100.0),
            (2.0, 3.0, 3.0, 200.0),
            (3.0, 2.0, 2.0, 300.0),
        ]);
        let entries = correlate_with_popularity_by_name(&table, &["end", "Strength"]).unwrap();
        let order: Vec<Column> = entries.iter().map(|e| e.column).collect();
        assert_eq!(order, vec![STR, END]);

        let err = correlate_with_popularity_by_name(&table, &["end", "grip"]).unwrap_err();
        assert_eq!(err.code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_cell_serializes_with_status_tag() {
        let json = serde_json::to_value(CorrelationCell::Defined { value: 0.5 }).unwrap();
        assert_eq!(json["status"], "defined");
        let json = serde_json::to_value(CorrelationCell::Undefined {
            reason: UndefinedReason::ZeroVariance {
                column: "end".into(),
            },
        })
        .unwrap();
        assert_eq!(json["status"], "undefined");
        assert_eq!(json["reason"]["kind"], "zero_variance");
    }

    proptest! {
        /// Property: defined coefficients stay within [-1, 1]
        #[test]
        fn prop_pearson_bounded(
            pairs in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..40)
        ) {
            let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
            if let Some(r) = pearson(&xs, "x", &ys, "y").as_option() {
                prop_assert!((-1.0..=1.0).contains(&r));
            }
        }

        /// Property: the matrix is exactly symmetric
        #[test]
        fn prop_matrix_symmetric(
            rows in prop::collection::vec((0.0f64..10.0, 0.0f64..10.0, 0.0f64..10.0, 0.0f64..1000.0), 2..20)
        ) {
            let table = table_from(&rows);
            let matrix = correlate(&table, &[END, STR, PWR]);
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert_eq!(matrix.cell(i, j), matrix.cell(j, i));
                }
            }
        }
    }
}
