use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::voice::VoiceCatalog;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness reports how much of the language catalog survived the startup
/// fetch; a degraded catalog still serves the guaranteed default.
pub async fn health_ready(State(catalog): State<Arc<VoiceCatalog>>) -> impl IntoResponse {
    let languages = catalog.languages().len();
    let status = if languages > 1 { "ready" } else { "degraded" };

    (
        StatusCode::OK,
        Json(json!({
            "status": status,
            "languages": languages,
            "voices": catalog.voices().len(),
        })),
    )
}
