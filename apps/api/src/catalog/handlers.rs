//! Axum route handlers for read-only catalog queries.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::catalog::JobFilter;
use crate::state::AppState;

/// GET /api/locations
pub async fn handle_locations(State(state): State<AppState>) -> Json<Value> {
    let locations = state.matcher.current().unique_locations();
    Json(json!({ "locations": locations }))
}

/// GET /api/jobs?location=&min_salary=&max_salary=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Json<Value> {
    let matcher = state.matcher.current();
    let jobs: Vec<_> = matcher.filter(&filter).jobs().collect();
    Json(json!({ "total": jobs.len(), "jobs": jobs }))
}
