//! JobMatcher — the service object owning a catalog and the index built from it.
//!
//! Constructed once (startup or reload) and shared by `Arc`. Every operation is
//! a read, so concurrent requests need no locking.

use std::collections::HashSet;

use anyhow::ensure;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::catalog::{CatalogError, CatalogSource, CatalogView, JobCatalog, JobFilter};
use crate::matching::index::RelevanceIndex;
use crate::models::job::{JobPosting, MatchResult};

pub const DEFAULT_MAX_FEATURES: usize = 500;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.05;
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Tuning knobs for index construction and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchSettings {
    /// Vocabulary cap.
    pub max_features: usize,
    /// Exclusive similarity floor.
    pub min_similarity: f64,
    pub max_results: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl MatchSettings {
    /// Rejects values under which no result could satisfy `0 < match_score <= 100`
    /// or every request would come back empty.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (0.0..1.0).contains(&self.min_similarity),
            "MIN_SIMILARITY must be a finite number in [0, 1), got {}",
            self.min_similarity
        );
        ensure!(self.max_features >= 1, "MAX_FEATURES must be at least 1");
        ensure!(self.max_results >= 1, "MAX_RESULTS must be at least 1");
        Ok(())
    }
}

#[derive(Debug)]
pub struct JobMatcher {
    catalog: JobCatalog,
    index: RelevanceIndex,
    settings: MatchSettings,
    version: Uuid,
    loaded_at: DateTime<Utc>,
}

impl JobMatcher {
    /// Builds the index from `catalog`; the pair is never separated afterwards.
    pub fn new(catalog: JobCatalog, settings: MatchSettings) -> Self {
        let documents: Vec<String> = catalog.jobs().iter().map(JobPosting::document_text).collect();
        let index = RelevanceIndex::build(&documents, settings.max_features);
        Self {
            catalog,
            index,
            settings,
            version: Uuid::new_v4(),
            loaded_at: Utc::now(),
        }
    }

    /// Same as [`JobMatcher::new`], run on the blocking thread pool.
    pub async fn build(catalog: JobCatalog, settings: MatchSettings) -> Result<Self, CatalogError> {
        tokio::task::spawn_blocking(move || Self::new(catalog, settings))
            .await
            .map_err(|e| CatalogError::Build(e.to_string()))
    }

    /// Startup load: a failing source yields an empty, still-usable matcher
    /// plus the cause for the operator.
    pub async fn load(
        source: &dyn CatalogSource,
        settings: MatchSettings,
    ) -> (Self, Option<CatalogError>) {
        let (catalog, load_err) = JobCatalog::load_or_empty(source).await;
        match Self::build(catalog, settings).await {
            Ok(matcher) => (matcher, load_err),
            Err(e) => {
                error!("Index build failed: {e}. Starting with an empty catalog");
                (Self::new(JobCatalog::default(), settings), Some(e))
            }
        }
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &RelevanceIndex {
        &self.index
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn version(&self) -> Uuid {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn unique_locations(&self) -> Vec<String> {
        self.catalog.unique_locations()
    }

    pub fn filter(&self, criteria: &JobFilter) -> CatalogView<'_> {
        self.catalog.filter(criteria)
    }

    /// Ranks `candidates` (default: the whole catalog) against `skills`.
    ///
    /// Degraded inputs (no skills, an unready index, a view from another
    /// catalog) give an empty result rather than an error.
    pub fn match_skills<'a>(
        &'a self,
        skills: &[String],
        candidates: Option<&CatalogView<'a>>,
    ) -> Vec<MatchResult<'a>> {
        if skills.is_empty() {
            return Vec::new();
        }
        if let Some(view) = candidates {
            if !view.belongs_to(&self.catalog) {
                warn!("Candidate view was taken from a different catalog; ignoring request");
                return Vec::new();
            }
        }
        let all;
        let view = match candidates {
            Some(view) => view,
            None => {
                all = self.catalog.all();
                &all
            }
        };
        if view.is_empty() {
            return Vec::new();
        }

        let user_text = skills.join(" ").to_lowercase();
        let user_skills: HashSet<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        let jobs = self.catalog.jobs();

        let mut results: Vec<MatchResult<'a>> = self
            .index
            .similarities(&user_text, view.rows())
            .into_iter()
            .filter(|&(_, similarity)| similarity > self.settings.min_similarity)
            .map(|(row, similarity)| annotate(&jobs[row], similarity, &user_skills))
            .filter(|result| result.match_score > 0.0)
            .collect();

        // sort_by is stable: equal scores keep catalog order.
        results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        results.truncate(self.settings.max_results);

        debug!(
            "Scored {} candidates for {} skills: {} matches",
            view.len(),
            skills.len(),
            results.len()
        );
        results
    }
}

fn annotate<'a>(job: &'a JobPosting, similarity: f64, user_skills: &HashSet<String>) -> MatchResult<'a> {
    let matching_skills: Vec<String> = job
        .required_skills
        .iter()
        .filter(|s| user_skills.contains(&s.to_lowercase()))
        .cloned()
        .collect();
    let total_required = job.required_skills.len();
    MatchResult {
        job,
        match_score: (similarity * 1000.0).round() / 10.0,
        explanation: format!(
            "You have {}/{} required skills",
            matching_skills.len(),
            total_required
        ),
        matching_skills,
        total_required,
    }
}
