//! # sports_core - Sports Attribute Analytics
//!
//! Loads the "which sport is best" attribute dataset, enriches it with a
//! static popularity reference and derives the descriptive metrics behind
//! the dashboard views.
//!
//! ## Pipeline
//! - CSV → `SportRecord` rows (`data::loader`)
//! - Left join with the popularity reference, mean imputation for misses
//! - Immutable `TableSnapshot`, cached by source file identity
//! - Pure metrics: correlation matrix, popularity correlation, scatter
//!   projections, head-to-head comparison (`analysis`)
//! - View assembly and JSON envelopes for a renderer (`api`)

pub mod analysis;
pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod models;

pub use analysis::{
    compare_sports, correlate, correlate_with_popularity, project, ComparisonState,
    CorrelationCell, CorrelationMatrix, HeadToHead, PopularityCorrelation, ScatterSeries,
};
pub use api::{compare_sports_json, dashboard_json, dashboard_json_from_cache, DashboardViews, ViewOutcome};
pub use config::DashboardConfig;
pub use data::{load_table, SnapshotCache, TableSnapshot};
pub use error::{DashboardError, Result};
pub use models::{Attribute, Column, EnrichedRow, EnrichedTable, SportRecord};
