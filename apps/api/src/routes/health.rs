use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Skill matching API",
        "status": "running"
    }))
}

/// GET /health
/// Service version plus the state of the loaded catalog and index.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let matcher = state.matcher.current();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "jobs": matcher.catalog().len(),
        "vocabulary": matcher.index().vocabulary_len(),
        "index_ready": matcher.index().is_ready(),
        "catalog_version": matcher.version(),
        "loaded_at": matcher.loaded_at(),
        "jobs_path": state.config.jobs_path.display().to_string(),
    }))
}
