use std::path::PathBuf;
use thiserror::Error;

/// Every failure the dashboard core can signal.
///
/// None of these are fatal to a session: the caller recovers at the boundary
/// of the view that raised it and keeps rendering the others.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Source file not found or unreadable: {path}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed source {path}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },

    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Correlation undefined for {column}: {reason}")]
    UndefinedCorrelation { column: String, reason: String },

    #[error("Sport not found: {sport}")]
    SportNotFound { sport: String },

    #[error("Popularity cannot be imputed: none of the {rows} rows matched the reference table")]
    PopularityUnimputable { rows: usize },
}

impl DashboardError {
    /// Stable error code used in API envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            DashboardError::MalformedSource { .. } => "MALFORMED_SOURCE",
            DashboardError::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            DashboardError::UndefinedCorrelation { .. } => "UNDEFINED_CORRELATION",
            DashboardError::SportNotFound { .. } => "SPORT_NOT_FOUND",
            DashboardError::PopularityUnimputable { .. } => "POPULARITY_UNIMPUTABLE",
        }
    }

    /// True when the source table itself could not be produced, so every
    /// dependent view should fall back to its empty state.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::SourceNotFound { .. }
                | DashboardError::MalformedSource { .. }
                | DashboardError::PopularityUnimputable { .. }
        )
    }

    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        DashboardError::ColumnNotFound {
            column: column.into(),
        }
    }

    pub(crate) fn sport_not_found(sport: impl Into<String>) -> Self {
        DashboardError::SportNotFound {
            sport: sport.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
