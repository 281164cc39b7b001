use crate::error::DashboardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schema version stamped on every API envelope
pub const API_SCHEMA_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Structured API error with codes and details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}

impl From<&DashboardError> for ApiError {
    fn from(err: &DashboardError) -> Self {
        let base = ApiError::new(err.code(), &err.to_string());
        match err {
            DashboardError::SourceNotFound { path, .. } | DashboardError::MalformedSource { path, .. } => {
                base.with_detail("path", path.display().to_string())
            }
            DashboardError::ColumnNotFound { column } => base.with_detail("column", column.as_str()),
            DashboardError::UndefinedCorrelation { column, reason } => base
                .with_detail("column", column.as_str())
                .with_detail("reason", reason.as_str()),
            DashboardError::SportNotFound { sport } => base.with_detail("sport", sport.as_str()),
            DashboardError::PopularityUnimputable { rows } => base.with_detail("rows", *rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_dashboard_error() {
        let err = DashboardError::SportNotFound {
            sport: "Quidditch".into(),
        };
        let api = ApiError::from(&err);
        assert_eq!(api.code, "SPORT_NOT_FOUND");
        assert_eq!(api.message, "Sport not found: Quidditch");
        assert_eq!(api.details.unwrap()["sport"], "Quidditch");
    }

    #[test]
    fn test_envelopes() {
        let ok = ApiResponse::success(42);
        assert!(ok.success);
        assert_eq!(ok.schema_version, API_SCHEMA_VERSION);

        let failed = ApiResponse::<u8>::error(ApiError::new("X", "boom"));
        assert!(!failed.success);
        assert!(failed.data.is_none());
    }
}
