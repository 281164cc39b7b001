//! Derived metrics over an `EnrichedTable`.
//!
//! Every function here is a pure function of its inputs and never mutates
//! the table.

pub mod compare;
pub mod metrics;
pub mod projection;

pub use compare::{
    compare_sports, compare_sports_by_name, default_pair, ComparisonState, HeadToHead,
    SportProfile,
};
pub use metrics::{
    correlate, correlate_by_name, correlate_with_popularity, correlate_with_popularity_by_name,
    pearson, pearson_pairwise, summarize, ColumnSummary, CorrelationCell, CorrelationMatrix, PopularityCorrelation,
    UndefinedReason,
};
pub use projection::{project, project_columns, ScatterPoint, ScatterSeries};
