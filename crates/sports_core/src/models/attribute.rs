use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten skill ratings scored for every sport.
///
/// Maps to the source columns in this order:
/// end, str, pwr, spd, agi, flx, ner, dur, han, ana
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Attribute {
    Endurance = 0,
    Strength = 1,
    Power = 2,
    Speed = 3,
    Agility = 4,
    Flexibility = 5,
    Nerve = 6,
    Durability = 7,
    HandEye = 8,
    Analytic = 9,
}

impl Attribute {
    pub const COUNT: usize = 10;

    /// All attributes in source column order
    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::Endurance,
        Attribute::Strength,
        Attribute::Power,
        Attribute::Speed,
        Attribute::Agility,
        Attribute::Flexibility,
        Attribute::Nerve,
        Attribute::Durability,
        Attribute::HandEye,
        Attribute::Analytic,
    ];

    /// Column header used in the source file
    pub fn code(&self) -> &'static str {
        match self {
            Attribute::Endurance => "end",
            Attribute::Strength => "str",
            Attribute::Power => "pwr",
            Attribute::Speed => "spd",
            Attribute::Agility => "agi",
            Attribute::Flexibility => "flx",
            Attribute::Nerve => "ner",
            Attribute::Durability => "dur",
            Attribute::HandEye => "han",
            Attribute::Analytic => "ana",
        }
    }

    /// Human-readable label for axis titles and legends
    pub fn display_name(&self) -> &'static str {
        match self {
            Attribute::Endurance => "Endurance",
            Attribute::Strength => "Strength",
            Attribute::Power => "Power",
            Attribute::Speed => "Speed",
            Attribute::Agility => "Agility",
            Attribute::Flexibility => "Flexibility",
            Attribute::Nerve => "Nerve",
            Attribute::Durability => "Durability",
            Attribute::HandEye => "Hand-Eye Coordination",
            Attribute::Analytic => "Analytic Aptitude",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Resolve a source code ("str") or display name ("Strength").
    pub fn from_name(name: &str) -> Option<Attribute> {
        let needle = name.trim();
        Attribute::ALL.iter().copied().find(|attr| {
            attr.code().eq_ignore_ascii_case(needle)
                || attr.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A numeric column of the enriched table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Rank,
    Total,
    PopularityIndex,
    Skill(Attribute),
}

impl Column {
    /// Resolve a column by name.
    ///
    /// `sport` is not numeric and resolves to `ColumnNotFound` like any
    /// unknown header.
    pub fn parse(name: &str) -> Result<Column> {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "rank" => Ok(Column::Rank),
            "total" => Ok(Column::Total),
            "popularity_index" | "popularity" => Ok(Column::PopularityIndex),
            _ => Attribute::from_name(trimmed)
                .map(Column::Skill)
                .ok_or_else(|| DashboardError::column_not_found(trimmed)),
        }
    }

    /// Resolve an ordered list of names, failing on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Column>> {
        names.iter().map(|n| Column::parse(n.as_ref())).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Rank => "rank",
            Column::Total => "total",
            Column::PopularityIndex => "popularity_index",
            Column::Skill(attr) => attr.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Rank => "Rank",
            Column::Total => "Total Skill Score",
            Column::PopularityIndex => "Popularity Index",
            Column::Skill(attr) => attr.display_name(),
        }
    }

    /// The ten skill columns, in source order
    pub fn skills() -> Vec<Column> {
        Attribute::ALL.iter().copied().map(Column::Skill).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
