// Web server: Axum JSON API over the analytics views.
//
// Every /api/analysis/* route takes `?organization=` and answers with the same
// JSON shapes the old dashboard consumed. Authentication and resolving the
// caller's organization belong to whatever sits in front of this server.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analytics::FeedbackAnalytics;
use crate::db::Database;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub analytics: Arc<FeedbackAnalytics>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    db: Arc<dyn Database>,
    analytics: FeedbackAnalytics,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        db,
        analytics: Arc::new(analytics),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Feedlens API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let analysis = Router::new()
        .route("/api/analysis/average", get(handlers::analysis::average))
        .route("/api/analysis/ratings", get(handlers::analysis::ratings))
        .route("/api/analysis/keywords", get(handlers::analysis::keywords))
        .route(
            "/api/analysis/clustering",
            get(handlers::analysis::clustering),
        )
        .route(
            "/api/organizations",
            get(handlers::organizations::list_organizations),
        );

    Router::new()
        .merge(analysis)
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check. Always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
