//! Assembly of every dashboard view from one snapshot.
//!
//! Views are built independently: a failure in one is captured in its own
//! `ViewOutcome` and never stops the others.

use super::response::ApiError;
use crate::analysis::{
    compare_sports, correlate_by_name, correlate_with_popularity_by_name, default_pair, project, summarize,
    ColumnSummary, CorrelationMatrix, HeadToHead, PopularityCorrelation, ScatterSeries,
};
use crate::config::{DashboardConfig, ScatterPair};
use crate::data::{SnapshotMetadata, TableSnapshot};
use crate::error::Result;
use crate::models::{Column, EnrichedRow, EnrichedTable};
use serde::Serialize;

/// A view's data, or the error that kept it from rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    Ready { data: T },
    Unavailable { error: ApiError },
}

impl<T> ViewOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewOutcome::Ready { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewOutcome::Ready { data } => Some(data),
            ViewOutcome::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ViewOutcome::Ready { .. } => None,
            ViewOutcome::Unavailable { error } => Some(error),
        }
    }
}

impl<T> From<Result<T>> for ViewOutcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => ViewOutcome::Ready { data },
            Err(err) => {
                log::warn!("View unavailable: {}", err);
                ViewOutcome::Unavailable {
                    error: ApiError::from(&err),
                }
            }
        }
    }
}

/// Raw table preview with shape and per-column summaries
#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<&'static str>,
    pub records: Vec<EnrichedRow>,
    pub summaries: Vec<ColumnSummary>,
    pub metadata: SnapshotMetadata,
}

impl OverviewView {
    pub fn build(snapshot: &TableSnapshot) -> Self {
        let table = &snapshot.table;
        let (rows, columns) = table.shape();
        let mut numeric = vec![Column::Rank, Column::Total];
        numeric.extend(Column::skills());
        numeric.push(Column::PopularityIndex);

        Self {
            rows,
            columns,
            column_names: EnrichedTable::column_names(),
            records: table.rows().to_vec(),
            summaries: summarize(table, &numeric),
            metadata: snapshot.metadata.clone(),
        }
    }
}

/// Every view of the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViews {
    pub sports: Vec<String>,
    pub overview: OverviewView,
    pub heatmap: ViewOutcome<CorrelationMatrix>,
    pub skill_scatters: Vec<ViewOutcome<ScatterSeries>>,
    pub popularity_scatter: ViewOutcome<ScatterSeries>,
    pub popularity_correlation: ViewOutcome<Vec<PopularityCorrelation>>,
    pub head_to_head: ViewOutcome<HeadToHead>,
}

fn scatter(table: &EnrichedTable, pair: &ScatterPair) -> ViewOutcome<ScatterSeries> {
    project(table, &pair.x, &pair.y).into()
}

impl DashboardViews {
    pub fn build(snapshot: &TableSnapshot, config: &DashboardConfig) -> Self {
        let table = &snapshot.table;

        let heatmap: ViewOutcome<CorrelationMatrix> = correlate_by_name(table, &config.skill_columns).into();

        let popularity_correlation: ViewOutcome<Vec<PopularityCorrelation>> =
            correlate_with_popularity_by_name(table, &config.skill_columns).into();

        let head_to_head: ViewOutcome<HeadToHead> = config
            .skill_columns()
            .and_then(|cols| {
                let (a, b) = default_pair(table, &config.default_sport_a, &config.default_sport_b)?;
                compare_sports(table, &a, &b, &cols)
            })
            .into();

        Self {
            sports: table.distinct_sports().into_iter().map(str::to_string).collect(),
            overview: OverviewView::build(snapshot),
            heatmap,
            skill_scatters: config.scatter_pairs.iter().map(|p| scatter(table, p)).collect(),
            popularity_scatter: scatter(table, &config.popularity_scatter),
            popularity_correlation,
            head_to_head,
        }
    }

    /// Views that failed to build
    pub fn unavailable_count(&self) -> usize {
        let scatters = self
            .skill_scatters
            .iter()
            .filter(|s| !s.is_ready())
            .count();
        let singles = [
            self.heatmap.is_ready(),
            self.popularity_scatter.is_ready(),
            self.popularity_correlation.is_ready(),
            self.head_to_head.is_ready(),
        ]
        .iter()
        .filter(|ready| !**ready)
        .count();
        scatters + singles
    }
}
