//! Dashboard API handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use chrono::{DateTime, Utc};
use common::{RankedRecord, TimeWindow};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::response::{ApiListResponse, ApiResponse};
use crate::error::ApiError;
use crate::state::{RefreshOutcome, Status};
use crate::view::{render_view, DashboardView, ViewSelection};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// View query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// Time window: 1h, 4h, 12h, 24h or 7d (default 4h)
    pub window: Option<String>,
    /// Case-insensitive ticker filter
    pub search: Option<String>,
}

impl TryFrom<ViewQuery> for ViewSelection {
    type Error = ApiError;

    fn try_from(query: ViewQuery) -> Result<Self, Self::Error> {
        let window = match query.window.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<TimeWindow>()?,
            _ => TimeWindow::default(),
        };
        Ok(ViewSelection::new(window, query.search.unwrap_or_default()))
    }
}

/// Pipeline status summary
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusData {
    #[schema(value_type = Object)]
    pub status: Status,
    pub refreshing: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub records: usize,
}

/// Refresh acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshData {
    pub started: bool,
}

/// Dashboard page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Render gainers and losers for a window and search filter
#[utoipa::path(
    get,
    path = "/api/v1/view",
    params(ViewQuery),
    responses(
        (status = 200, description = "Rendered gainers and losers tables"),
        (status = 400, description = "Unknown time window")
    ),
    tag = "dashboard"
)]
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<ApiResponse<DashboardView>, ApiError> {
    let selection = ViewSelection::try_from(query)?;
    let snapshot = state.snapshot().await;

    let view = render_view(
        snapshot.as_deref().map(|s| (s.records.as_slice(), s.updated_at)),
        state.status().await,
        state.is_refreshing(),
        &selection,
        state.flagged(),
    );

    Ok(ApiResponse::new(view))
}

/// Start a full refresh in the background
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    responses(
        (status = 202, description = "Refresh started"),
        (status = 409, description = "A refresh is already running")
    ),
    tag = "dashboard"
)]
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<(StatusCode, ApiResponse<RefreshData>), ApiError> {
    match state.spawn_refresh() {
        RefreshOutcome::AlreadyRunning => Err(ApiError::Conflict("A refresh is already running".to_string())),
        _ => Ok((StatusCode::ACCEPTED, ApiResponse::new(RefreshData { started: true }))),
    }
}

/// Pipeline status and last update time
#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses(
        (status = 200, description = "Current pipeline status")
    ),
    tag = "dashboard"
)]
pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<ApiResponse<StatusData>, ApiError> {
    let snapshot = state.snapshot().await;

    Ok(ApiResponse::new(StatusData {
        status: state.status().await,
        refreshing: state.is_refreshing(),
        last_updated: snapshot.as_ref().map(|s| s.updated_at),
        records: snapshot.as_ref().map(|s| s.records.len()).unwrap_or(0),
    }))
}

/// The full unranked dataset of the last successful refresh
#[utoipa::path(
    get,
    path = "/api/v1/records",
    responses(
        (status = 200, description = "All records with every window's change")
    ),
    tag = "dashboard"
)]
pub async fn get_records(State(state): State<Arc<AppState>>) -> Result<ApiListResponse<RankedRecord>, ApiError> {
    let records = state
        .snapshot()
        .await
        .map(|s| s.records.clone())
        .unwrap_or_default();

    Ok(ApiListResponse::counted(records))
}
