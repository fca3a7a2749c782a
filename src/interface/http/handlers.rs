use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::{MonitorHandle, SchedulerPhase, SettingsService};
use crate::domain::{CycleReport, MonitorSettings, SettingsPatch, Target};
use crate::ports::ReportStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<SettingsService>,
    pub reports: Arc<dyn ReportStore>,
    pub monitor: Arc<MonitorHandle>,
}

/// Response for /api/status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub timestamp: String,
    pub phase: SchedulerPhase,
    pub target: Target,
    /// Rendered status of the last cycle, `None` before the first probe completes
    pub text: Option<String>,
    pub report: Option<CycleReport>,
}

/// Response for /api/history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub timestamp: String,
    pub reports: Vec<CycleReport>,
}

/// Query params for /api/history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_minutes")]
    pub minutes: u64,
}

fn default_minutes() -> u64 {
    5
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

/// Handler for GET /api/health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "pingmon"
        })),
    )
}

/// Handler for GET /api/status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let report = state.reports.latest().map(|r| r.as_ref().clone());

    Json(StatusResponse {
        timestamp: chrono::Utc::now().to_rfc3339(),
        phase: state.monitor.phase(),
        target: state.settings.current().target,
        text: report.as_ref().map(CycleReport::text),
        report,
    })
}

/// Handler for GET /api/history
pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let window = Duration::from_secs(params.minutes.saturating_mul(60));
    let reports = state
        .reports
        .history(window)
        .iter()
        .map(|r| r.as_ref().clone())
        .collect();

    Json(HistoryResponse {
        timestamp: chrono::Utc::now().to_rfc3339(),
        reports,
    })
}

/// Handler for GET /api/settings
pub async fn get_settings_handler(State(state): State<AppState>) -> Json<MonitorSettings> {
    Json(state.settings.current())
}

/// Handler for PUT /api/settings
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Response {
    match state.settings.update(&patch).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}
