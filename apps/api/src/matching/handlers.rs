//! Axum route handlers for matching and catalog reload.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::catalog::JobFilter;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    pub skills: Vec<String>,
    /// Accepted for client compatibility; not used in scoring.
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_salary: Option<i64>,
    #[serde(default)]
    pub max_salary: Option<i64>,
}

impl MatchJobsRequest {
    fn filter(&self) -> JobFilter {
        JobFilter {
            location: self.location.clone(),
            min_salary: self.min_salary,
            max_salary: self.max_salary,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/match-jobs
///
/// Ranks the catalog (narrowed by any supplied filters) against the skills.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchJobsRequest>,
) -> Result<Json<Value>, AppError> {
    let matcher = state.matcher.current();
    let filter = request.filter();
    if let Some(level) = &request.experience_level {
        debug!("experience_level {level:?} supplied; not used for ranking");
    }

    let matches = if filter.is_empty() {
        matcher.match_skills(&request.skills, None)
    } else {
        let view = matcher.filter(&filter);
        matcher.match_skills(&request.skills, Some(&view))
    };

    // Serialized here: results borrow from this request's matcher snapshot.
    Ok(Json(json!({
        "success": true,
        "user_skills": request.skills,
        "total_matches": matches.len(),
        "matches": matches,
    })))
}

/// POST /api/catalog/reload
///
/// Rebuilds catalog and index from the configured source and swaps them in.
pub async fn handle_reload(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let matcher = state.matcher.reload().await?;
    Ok(Json(json!({
        "reloaded": true,
        "jobs": matcher.catalog().len(),
        "catalog_version": matcher.version(),
    })))
}
