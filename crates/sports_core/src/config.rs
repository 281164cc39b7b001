//! Dashboard configuration.
//!
//! Resolution order for the source path:
//! 1) `SPORTS_DASHBOARD_DATA` if set (canonical)
//! 1b) `SPORTS_DATA_PATH` if set (alias)
//! 2) `which_sport_is_best.csv` (relative)

use crate::error::{DashboardError, Result};
use crate::models::{Attribute, Column};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Canonical env var for overriding the source path.
pub const SOURCE_PATH_ENV: &str = "SPORTS_DASHBOARD_DATA";

/// Alias accepted for the same override.
pub const SOURCE_PATH_ENV_ALIAS: &str = "SPORTS_DATA_PATH";

/// Default relative path used when no override is set.
pub const DEFAULT_SOURCE_PATH: &str = "which_sport_is_best.csv";

/// A named pair of columns for a scatter view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterPair {
    pub x: String,
    pub y: String,
}

impl ScatterPair {
    pub fn new(x: &str, y: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source_path: PathBuf,
    /// Single ASCII character
    pub delimiter: char,
    /// Columns used by the heatmap, popularity correlation and comparison
    pub skill_columns: Vec<String>,
    pub scatter_pairs: Vec<ScatterPair>,
    pub popularity_scatter: ScatterPair,
    pub default_sport_a: String,
    pub default_sport_b: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            delimiter: ',',
            skill_columns: Attribute::ALL.iter().map(|a| a.code().to_string()).collect(),
            scatter_pairs: vec![ScatterPair::new("str", "pwr"), ScatterPair::new("str", "han")],
            popularity_scatter: ScatterPair::new("total", "popularity_index"),
            default_sport_a: "Football".to_string(),
            default_sport_b: "Basketball".to_string(),
        }
    }
}

fn source_path_from_env() -> Option<PathBuf> {
    for name in [SOURCE_PATH_ENV, SOURCE_PATH_ENV_ALIAS] {
        if let Ok(path) = env::var(name) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
    }
    None
}

impl DashboardConfig {
    /// Defaults with the source path taken from the environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = source_path_from_env() {
            config.source_path = path;
        }
        config
    }

    /// Parse a JSON config; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.source_path = path.as_ref().to_path_buf();
        self
    }

    /// Delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(DashboardError::MalformedSource {
                path: self.source_path.clone(),
                reason: format!("delimiter {:?} is not a single ASCII character", self.delimiter),
            })
        }
    }

    /// Resolved skill columns.
    pub fn skill_columns(&self) -> Result<Vec<Column>> {
        Column::parse_all(&self.skill_columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_views() {
        let config = DashboardConfig::default();
        assert_eq!(config.source_path, PathBuf::from("which_sport_is_best.csv"));
        assert_eq!(config.skill_columns().unwrap(), Column::skills());
        assert_eq!(config.scatter_pairs[0], ScatterPair::new("str", "pwr"));
        assert_eq!(config.scatter_pairs[1], ScatterPair::new("str", "han"));
        assert_eq!(config.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{ "source_path": "data/sports.csv", "default_sport_a": "Tennis" }"#,
        )
        .unwrap();
        assert_eq!(config.source_path, PathBuf::from("data/sports.csv"));
        assert_eq!(config.default_sport_a, "Tennis");
        assert_eq!(config.default_sport_b, "Basketball");
        assert_eq!(config.skill_columns.len(), 10);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = DashboardConfig {
            delimiter: '€',
            ..DashboardConfig::default()
        };
        assert!(config.delimiter_byte().is_err());
    }

    #[test]
    fn test_unknown_skill_column_surfaces() {
        let config = DashboardConfig {
            skill_columns: vec!["str".into(), "luck".into()],
            ..DashboardConfig::default()
        };
        assert_eq!(config.skill_columns().unwrap_err().code(), "COLUMN_NOT_FOUND");
    }
}
