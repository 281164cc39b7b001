pub mod dashboard_json;
pub mod response;
pub mod views;

pub use dashboard_json::{compare_sports_json, dashboard_json, dashboard_json_from_cache};
pub use response::{ApiError, ApiResponse, API_SCHEMA_VERSION};
pub use views::{DashboardViews, OverviewView, ViewOutcome};
