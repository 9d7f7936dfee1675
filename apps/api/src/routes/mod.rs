pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/locations", get(catalog::handle_locations))
        .route("/api/jobs", get(catalog::handle_list_jobs))
        // Matching API
        .route("/api/match-jobs", post(matching::handle_match_jobs))
        .route("/api/catalog/reload", post(matching::handle_reload))
        .with_state(state)
}
