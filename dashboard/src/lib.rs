//! Live gainers/losers dashboard for USDT-margined perpetual swaps

pub mod api;
pub mod config;
pub mod error;
pub mod flagged;
pub mod refresh;
pub mod state;
pub mod view;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::DashboardConfig;
pub use state::{spawn_auto_refresh, AppState, RefreshOutcome, Snapshot, Status};
pub use view::{render_tables, render_view, DashboardView, RowView, ViewSelection};

use crate::api::dashboard::{get_records, get_status, get_view, health, index, refresh};

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::dashboard::get_view,
        api::dashboard::refresh,
        api::dashboard::get_status,
        api::dashboard::get_records,
    ),
    components(
        schemas(
            common::RankedRecord,
            view::DashboardView,
            view::RowView,
            api::dashboard::StatusData,
            api::dashboard::RefreshData,
            api::response::ResponseMetadata,
        )
    ),
    tags(
        (name = "dashboard", description = "Gainers/losers dashboard endpoints")
    ),
    info(
        title = "OKX Pulse Dashboard API",
        version = "1.0.0",
        description = "Top gainers and losers by notional volume across 1h, 4h, 12h, 24h and 7d windows"
    )
)]
pub struct ApiDoc;

/// Build the full application router around `state`
pub fn build_router(state: Arc<AppState>, log_level: Level) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/view", get(get_view))
        .route("/refresh", post(refresh))
        .route("/status", get(get_status))
        .route("/records", get(get_records));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .with_state(state)
}
