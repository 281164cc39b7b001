//! JSON entry points for an external renderer.
//!
//! Every function returns an `ApiResponse` envelope as a JSON string and
//! never panics on bad input: failures come back as `success: false` with a
//! coded error.

use super::response::{ApiError, ApiResponse};
use super::views::DashboardViews;
use crate::analysis::{compare_sports, HeadToHead};
use crate::config::DashboardConfig;
use crate::data::{SnapshotCache, TableSnapshot};
use crate::models::{Column, EnrichedTable};
use serde::{Deserialize, Serialize};

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"data":null,"error":{{"code":"SERIALIZATION_ERROR","message":"{}","details":null}}}}"#,
            e.to_string().replace('"', "'")
        )
    })
}

/// All views for an already-loaded snapshot.
pub fn dashboard_json(snapshot: &TableSnapshot, config: &DashboardConfig) -> String {
    to_json(&ApiResponse::success(DashboardViews::build(snapshot, config)))
}

/// All views, loading (or reusing) the snapshot for `config.source_path`.
///
/// A load failure yields an error envelope so the caller can show its
/// empty state.
pub fn dashboard_json_from_cache(cache: &SnapshotCache, config: &DashboardConfig) -> String {
    match cache.get_or_load(&config.source_path) {
        Ok(snapshot) => dashboard_json(&snapshot, config),
        Err(err) => {
            log::error!("Dashboard unavailable: {}", err);
            to_json(&ApiResponse::<DashboardViews>::error(ApiError::from(&err)))
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    sport_a: String,
    sport_b: String,
    #[serde(default)]
    columns: Option<Vec<String>>,
}

/// Head-to-head comparison.
///
/// Request: `{"sport_a": "...", "sport_b": "...", "columns": ["str", ...]}`;
/// `columns` defaults to the ten skills.
pub fn compare_sports_json(table: &EnrichedTable, request_json: &str) -> String {
    let request: CompareRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => {
            let error = ApiError::new("INVALID_JSON", &format!("Failed to parse request JSON: {}", e));
            return to_json(&ApiResponse::<HeadToHead>::error(error));
        }
    };

    let columns = match request.columns {
        Some(names) => Column::parse_all(&names),
        None => Ok(Column::skills()),
    };

    let result = columns.and_then(|cols| compare_sports(table, &request.sport_a, &request.sport_b, &cols));
    match result {
        Ok(h2h) => to_json(&ApiResponse::success(h2h)),
        Err(err) => to_json(&ApiResponse::<HeadToHead>::error(ApiError::from(&err))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_reference;
    use serde_json::Value;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    const CSV: &str = "sport,end,str,pwr,spd,agi,flx,ner,dur,han,ana,total,rank\n\
        Football,5.38,8.63,8.13,7.13,6.38,4.38,7.75,8.5,5.5,7.13,68.875,3\n\
        Basketball,7.38,6.25,6.5,7.25,8.13,5.5,4.75,7.5,7.5,7.13,67.875,4\n\
        Golf,1.5,2,2.5,1,2,3.5,5,1.5,7.5,6.25,32.75,51\n";

    fn table() -> EnrichedTable {
        TableSnapshot::from_bytes(CSV.as_bytes(), b',', Path::new("api.csv"), builtin_reference())
            .unwrap()
            .table
    }

    #[test]
    fn test_compare_sports_json_success() {
        let response: Value = serde_json::from_str(&compare_sports_json(
            &table(),
            r#"{"sport_a": "Football", "sport_b": "Basketball"}"#,
        ))
        .unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["sport_a"]["values"].as_array().unwrap().len(), 10);
        assert_eq!(response["data"]["sport_b"]["values"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_compare_sports_json_unknown_sport() {
        let response: Value = serde_json::from_str(&compare_sports_json(
            &table(),
            r#"{"sport_a": "Football", "sport_b": "Chess"}"#,
        ))
        .unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "SPORT_NOT_FOUND");
        assert_eq!(response["error"]["details"]["sport"], "Chess");
    }

    #[test]
    fn test_compare_sports_json_custom_columns() {
        let response: Value = serde_json::from_str(&compare_sports_json(
            &table(),
            r#"{"sport_a": "Golf", "sport_b": "Football", "columns": ["str", "total"]}"#,
        ))
        .unwrap();
        assert_eq!(response["data"]["sport_a"]["values"][1], 32.75);

        let response: Value = serde_json::from_str(&compare_sports_json(
            &table(),
            r#"{"sport_a": "Golf", "sport_b": "Football", "columns": ["grip"]}"#,
        ))
        .unwrap();
        assert_eq!(response["error"]["code"], "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_compare_sports_json_invalid_request() {
        let response: Value = serde_json::from_str(&compare_sports_json(&table(), "{not json")).unwrap();
        assert_eq!(response["error"]["code"], "INVALID_JSON");
    }

    #[test]
    fn test_dashboard_json_from_cache_missing_source() {
        let cache = SnapshotCache::default();
        let config = DashboardConfig::default().with_source_path("/nonexistent/sports.csv");
        let response: Value = serde_json::from_str(&dashboard_json_from_cache(&cache, &config)).unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "SOURCE_NOT_FOUND");
    }

    #[test]
    fn test_dashboard_json_from_cache_loads_views() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let cache = SnapshotCache::default();
        let config = DashboardConfig::default().with_source_path(file.path());

        let response: Value = serde_json::from_str(&dashboard_json_from_cache(&cache, &config)).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["overview"]["rows"], 3);
        assert_eq!(response["data"]["sports"][2], "Golf");
        assert_eq!(response["data"]["heatmap"]["state"], "ready");
    }
}
