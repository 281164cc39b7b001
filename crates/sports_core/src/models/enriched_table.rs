//! The in-memory table produced by the loader.
//!
//! Immutable once built. Rows keep source order, which is what the
//! first-occurrence tie-break for duplicate sport names relies on.

use super::attribute::{Attribute, Column};
use super::sport_record::EnrichedRow;
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// sport + rank + total + ten skills + popularity_index
pub const TABLE_COLUMN_COUNT: usize = 3 + Attribute::COUNT + 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTable {
    rows: Vec<EnrichedRow>,
}

impl EnrichedTable {
    pub fn new(rows: Vec<EnrichedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), TABLE_COLUMN_COUNT)
    }

    /// Header names in display order
    pub fn column_names() -> Vec<&'static str> {
        let mut names = vec!["sport", "rank", "total"];
        names.extend(Attribute::ALL.iter().map(|a| a.code()));
        names.push("popularity_index");
        names
    }

    /// Values of one numeric column, in row order; `None` marks a missing cell.
    pub fn column_values(&self, column: Column) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }

    /// Values of a column looked up by name.
    pub fn column_by_name(&self, name: &str) -> Result<Vec<Option<f64>>> {
        Column::parse(name).map(|column| self.column_values(column))
    }

    /// Distinct sport names in first-occurrence order.
    pub fn distinct_sports(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(EnrichedRow::sport)
            .filter(|sport| seen.insert(*sport))
            .collect()
    }

    pub fn contains_sport(&self, sport: &str) -> bool {
        self.rows.iter().any(|row| row.sport() == sport)
    }

    /// First row (by source order) for the given sport, with its row index.
    pub fn first_by_sport(&self, sport: &str) -> Result<(usize, &EnrichedRow)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.sport() == sport)
            .ok_or_else(|| DashboardError::sport_not_found(sport))
    }

    /// Rows whose popularity was filled in rather than matched.
    pub fn imputed_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_imputed()).count()
    }
}
