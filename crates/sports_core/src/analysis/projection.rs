//! Two-column scatter projections.

use crate::error::Result;
use crate::models::{Column, EnrichedTable};
use serde::{Deserialize, Serialize};

/// One scatter point, tagged with the row it came from.
///
/// A coordinate is `None` where the source cell was missing; the point is
/// still emitted so the series stays aligned with the table rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub sport: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ScatterPoint {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

/// (x, y) pairs for every row, in row order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub x: Column,
    pub y: Column,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bare coordinate pairs of the points that can be plotted
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().filter_map(ScatterPoint::coordinates).collect()
    }
}

/// Project two resolved columns.
pub fn project_columns(table: &EnrichedTable, x: Column, y: Column) -> ScatterSeries {
    let points = table
        .rows()
        .iter()
        .map(|row| ScatterPoint {
            sport: row.sport().to_string(),
            x: row.value(x),
            y: row.value(y),
        })
        .collect();

    ScatterSeries {
        x,
        y,
        x_label: format!("{} ({})", x.label(), x.name()),
        y_label: format!("{} ({})", y.label(), y.name()),
        points,
    }
}

/// Project two columns by name.
///
/// Both names are resolved before any point is produced, so an unknown
/// column yields `ColumnNotFound` and never a partial series.
pub fn project(table: &EnrichedTable, column_a: &str, column_b: &str) -> Result<ScatterSeries> {
    let x = Column::parse(column_a)?;
    let y = Column::parse(column_b)?;
    Ok(project_columns(table, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::{Attribute, EnrichedRow, PopularitySource, SportRecord};

    fn table() -> EnrichedTable {
        let rows = [("Boxing", 8.0, 9.0), ("Golf", 2.0, 3.0), ("Boxing", 7.0, 6.0)]
            .iter()
            .enumerate()
            .map(|(i, &(sport, strength, power))| {
                let mut skills = [0.0; Attribute::COUNT];
                skills[Attribute::Strength.index()] = strength;
                skills[Attribute::Power.index()] = power;
                EnrichedRow {
                    record: SportRecord::new(sport, i as u32 + 1, strength + power, skills),
                    popularity_index: 100.0 * (i + 1) as f64,
                    popularity_source: PopularitySource::Reference,
                }
            })
            .collect();
        EnrichedTable::new(rows)
    }

    #[test]
    fn test_projection_preserves_row_count_and_order() {
        let table = table();
        let series = project(&table, "str", "pwr").unwrap();
        assert_eq!(series.len(), table.len());
        assert_eq!(series.pairs(), vec![(8.0, 9.0), (2.0, 3.0), (7.0, 6.0)]);
        let sports: Vec<&str> = series.points.iter().map(|p| p.sport.as_str()).collect();
        assert_eq!(sports, vec!["Boxing", "Golf", "Boxing"]);
    }

    #[test]
    fn test_missing_cell_keeps_the_point() {
        let mut rows = table().rows().to_vec();
        rows[1].record.skills[Attribute::Strength.index()] = None;
        let table = EnrichedTable::new(rows);

        let series = project(&table, "str", "pwr").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[1].sport, "Golf");
        assert_eq!(series.points[1].x, None);
        assert_eq!(series.points[1].y, Some(3.0));
        assert_eq!(series.pairs(), vec![(8.0, 9.0), (7.0, 6.0)]);

        let json = serde_json::to_value(&series).unwrap();
        assert!(json["points"][1]["x"].is_null());
    }

    #[test]
    fn test_total_vs_popularity() {
        let series = project(&table(), "total", "popularity_index").unwrap();
        assert_eq!(series.pairs()[1], (5.0, 200.0));
        assert_eq!(series.y_label, "Popularity Index (popularity_index)");
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        for (a, b) in [("str", "nope"), ("nope", "str")] {
            match project(&table(), a, b) {
                Err(DashboardError::ColumnNotFound { column }) => assert_eq!(column, "nope"),
                other => panic!("expected ColumnNotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_table_projects_nothing() {
        let series = project(&EnrichedTable::default(), "str", "han").unwrap();
        assert!(series.is_empty());
    }
}
