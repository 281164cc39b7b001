use super::attribute::{Attribute, Column};
use serde::{Deserialize, Serialize};

/// One row of the source dataset.
///
/// `sport` is not unique: the same name may appear on several rows.
/// Numeric cells that were blank or unparseable in the source are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportRecord {
    pub sport: String,
    pub rank: Option<u32>,
    pub total: Option<f64>,
    /// Skill ratings indexed by `Attribute::index()`
    pub skills: [Option<f64>; Attribute::COUNT],
}

impl SportRecord {
    /// A record with every numeric cell present.
    pub fn new(sport: impl Into<String>, rank: u32, total: f64, skills: [f64; Attribute::COUNT]) -> Self {
        Self {
            sport: sport.into(),
            rank: Some(rank),
            total: Some(total),
            skills: skills.map(Some),
        }
    }

    pub fn skill(&self, attribute: Attribute) -> Option<f64> {
        self.skills[attribute.index()]
    }

    /// Numeric cells with no value
    pub fn missing_cells(&self) -> usize {
        let skills = self.skills.iter().filter(|v| v.is_none()).count();
        skills + usize::from(self.rank.is_none()) + usize::from(self.total.is_none())
    }
}

/// Where a row's popularity value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularitySource {
    /// Matched an entry of the reference table
    Reference,
    /// Filled with the mean of matched rows
    Imputed,
}

/// A source row after the popularity join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub record: SportRecord,
    pub popularity_index: f64,
    pub popularity_source: PopularitySource,
}

impl EnrichedRow {
    pub fn sport(&self) -> &str {
        &self.record.sport
    }

    /// Value of a numeric column, `None` where the source cell was missing.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Rank => self.record.rank.map(f64::from),
            Column::Total => self.record.total,
            Column::PopularityIndex => Some(self.popularity_index),
            Column::Skill(attr) => self.record.skill(attr),
        }
    }

    pub fn is_imputed(&self) -> bool {
        self.popularity_source == PopularitySource::Imputed
    }
}
