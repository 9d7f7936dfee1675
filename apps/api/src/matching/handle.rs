//! Atomic publication of (catalog, index) pairs.
//!
//! Requests take an `Arc<JobMatcher>` snapshot and keep it for their lifetime;
//! a reload builds a whole new matcher and swaps the single reference.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{error, info};

use crate::catalog::{CatalogError, CatalogSource, JobCatalog};
use crate::matching::matcher::{JobMatcher, MatchSettings};

pub struct MatcherHandle {
    current: RwLock<Arc<JobMatcher>>,
    source: Arc<dyn CatalogSource>,
    settings: MatchSettings,
}

impl MatcherHandle {
    pub fn new(matcher: JobMatcher, source: Arc<dyn CatalogSource>) -> Self {
        let settings = *matcher.settings();
        Self {
            current: RwLock::new(Arc::new(matcher)),
            source,
            settings,
        }
    }

    /// Startup: loads from `source` and builds the index on the blocking pool,
    /// falling back to an empty matcher.
    pub async fn initialize(
        source: Arc<dyn CatalogSource>,
        settings: MatchSettings,
    ) -> (Self, Option<CatalogError>) {
        let (matcher, err) = JobMatcher::load(source.as_ref(), settings).await;
        (Self::new(matcher, source), err)
    }

    /// The pair in effect right now.
    pub fn current(&self) -> Arc<JobMatcher> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuilds from the configured source and publishes the result.
    /// On failure the current pair stays in place.
    pub async fn reload(&self) -> Result<Arc<JobMatcher>, CatalogError> {
        let catalog = match JobCatalog::load(self.source.as_ref()).await {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Catalog reload from {} failed: {e}", self.source.describe());
                return Err(e);
            }
        };

        let matcher = Arc::new(JobMatcher::build(catalog, self.settings).await?);

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&matcher);
        info!(
            "Published catalog {} with {} jobs",
            matcher.version(),
            matcher.catalog().len()
        );
        Ok(matcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{JsonFileSource, StaticSource};
    use crate::models::job::JobPosting;
    use std::io::Write;

    fn posting(id: i64, title: &str) -> JobPosting {
        JobPosting {
            id,
            title: title.to_string(),
            required_skills: vec!["Python".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reload_swaps_pair_and_keeps_old_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "title": "Backend Developer", "required_skills": ["Python"]}}]"#).unwrap();
        file.flush().unwrap();

        let source: Arc<dyn CatalogSource> = Arc::new(JsonFileSource::new(file.path()));
        let (handle, err) = MatcherHandle::initialize(source, MatchSettings::default()).await;
        assert!(err.is_none());
        let before = handle.current();
        assert_eq!(before.catalog().len(), 1);

        std::fs::write(
            file.path(),
            r#"[{"id": 1, "title": "Backend Developer"}, {"id": 2, "title": "Data Engineer"}]"#,
        )
        .unwrap();

        let after = handle.reload().await.unwrap();
        assert_eq!(after.catalog().len(), 2);
        assert_eq!(handle.current().version(), after.version());
        assert_ne!(before.version(), after.version());
        // The earlier snapshot is untouched.
        assert_eq!(before.catalog().len(), 1);
        assert_eq!(before.index().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_pair() {
        let dir = tempfile::tempdir().unwrap();
        let source: Arc<dyn CatalogSource> =
            Arc::new(JsonFileSource::new(dir.path().join("jobs_database.json")));
        let matcher = JobMatcher::new(
            JobCatalog::from_jobs(vec![posting(7, "Data Scientist")]),
            MatchSettings::default(),
        );
        let handle = MatcherHandle::new(matcher, source);
        let version = handle.current().version();

        let err = handle.reload().await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert_eq!(handle.current().version(), version);
        assert_eq!(handle.current().catalog().jobs()[0].id, 7);
    }

    #[tokio::test]
    async fn test_initialize_builds_index() {
        let source: Arc<dyn CatalogSource> = Arc::new(StaticSource(vec![
            posting(1, "Backend Developer"),
            posting(2, "Data Engineer"),
        ]));
        let (handle, err) = MatcherHandle::initialize(source, MatchSettings::default()).await;
        assert!(err.is_none());
        let current = handle.current();
        assert_eq!(current.catalog().len(), 2);
        assert!(current.index().is_ready());
    }

    #[tokio::test]
    async fn test_initialize_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source: Arc<dyn CatalogSource> =
            Arc::new(JsonFileSource::new(dir.path().join("jobs_database.json")));
        let (handle, err) = MatcherHandle::initialize(source, MatchSettings::default()).await;
        assert!(matches!(err, Some(CatalogError::NotFound { .. })));
        assert!(handle.current().catalog().is_empty());
    }
}
