// GET /api/organizations: organizations with feedback on file, largest first.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::{api_error, AppState};

pub async fn list_organizations(State(state): State<AppState>) -> Response {
    match state.db.organization_counts().await {
        Ok(counts) => Json(serde_json::json!({ "organizations": counts })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing organizations");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
