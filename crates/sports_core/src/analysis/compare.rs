//! Head-to-head attribute comparison between two sports.
//!
//! A sport name can occur on several rows. Each side always uses the first
//! matching row in source order.

use crate::error::{DashboardError, Result};
use crate::models::{Column, EnrichedTable};
use serde::{Deserialize, Serialize};

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportProfile {
    pub sport: String,
    /// Source row the values were taken from
    pub row_index: usize,
    /// Aligned with `HeadToHead::columns`; `None` where the cell was missing
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub columns: Vec<Column>,
    pub sport_a: SportProfile,
    pub sport_b: SportProfile,
}

impl HeadToHead {
    pub fn title(&self) -> String {
        format!("{} vs {} – Attribute Comparison", self.sport_a.sport, self.sport_b.sport)
    }

    /// (column, a, b) triples for rendering grouped bars
    pub fn rows(&self) -> impl Iterator<Item = (Column, Option<f64>, Option<f64>)> + '_ {
        self.columns
            .iter()
            .zip(self.sport_a.values.iter().zip(&self.sport_b.values))
            .map(|(&c, (&a, &b))| (c, a, b))
    }
}

fn profile(table: &EnrichedTable, sport: &str, columns: &[Column]) -> Result<SportProfile> {
    let (row_index, row) = table.first_by_sport(sport)?;
    Ok(SportProfile {
        sport: sport.to_string(),
        row_index,
        values: columns.iter().map(|&c| row.value(c)).collect(),
    })
}

/// Compare two sports across `columns`.
///
/// Both names must exist in the table; otherwise `SportNotFound` names the
/// first missing one.
pub fn compare_sports(table: &EnrichedTable, sport_a: &str, sport_b: &str, columns: &[Column]) -> Result<HeadToHead> {
    let a = profile(table, sport_a, columns)?;
    let b = profile(table, sport_b, columns)?;
    Ok(HeadToHead {
        columns: columns.to_vec(),
        sport_a: a,
        sport_b: b,
    })
}

/// Resolve column names, then compare.
pub fn compare_sports_by_name<S: AsRef<str>>(
    table: &EnrichedTable,
    sport_a: &str,
    sport_b: &str,
    names: &[S],
) -> Result<HeadToHead> {
    let columns = Column::parse_all(names)?;
    compare_sports(table, sport_a, sport_b, &columns)
}

/// The comparison currently on screen.
///
/// A rejected selection leaves the previous comparison in place.
#[derive(Debug, Clone, Default)]
pub struct ComparisonState {
    current: Option<HeadToHead>,
}

impl ComparisonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&HeadToHead> {
        self.current.as_ref()
    }

    pub fn select(
        &mut self,
        table: &EnrichedTable,
        sport_a: &str,
        sport_b: &str,
        columns: &[Column],
    ) -> Result<&HeadToHead> {
        let next = compare_sports(table, sport_a, sport_b, columns)?;
        Ok(self.current.insert(next))
    }
}

/// Default pair for the comparison view: the preferred names when present,
/// else the first and second distinct sports (the first twice if only one).
pub fn default_pair(table: &EnrichedTable, preferred_a: &str, preferred_b: &str) -> Result<(String, String)> {
    let sports = table.distinct_sports();
    let first = *sports
        .first()
        .ok_or_else(|| DashboardError::sport_not_found(preferred_a))?;

    let a = if table.contains_sport(preferred_a) {
        preferred_a
    } else {
        first
    };
    let b = if table.contains_sport(preferred_b) {
        preferred_b
    } else {
        sports.get(1).copied().unwrap_or(first)
    };
    Ok((a.to_string(), b.to_string()))
}
