//! Catalog Store — owns the ordered job list and narrows it by structured criteria.

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::catalog::source::{CatalogError, CatalogSource};
use crate::models::job::{JobPosting, MISSING_ID};

/// The loaded job catalog. Immutable once constructed; a reload builds a new one.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    jobs: Vec<JobPosting>,
}

/// Optional, conjunctive filter criteria. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub location: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.location.as_deref().map_or(true, str::is_empty)
            && self.min_salary.is_none()
            && self.max_salary.is_none()
    }

    fn accepts(&self, job: &JobPosting) -> bool {
        // Exact, case-sensitive: locations come from a closed catalog set.
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            if job.location != location {
                return false;
            }
        }
        if let Some(min) = self.min_salary {
            if job.salary_min < min {
                return false;
            }
        }
        if let Some(max) = self.max_salary {
            if job.salary_max > max {
                return false;
            }
        }
        true
    }
}

impl JobCatalog {
    /// Builds a catalog from already-loaded records. Records without an id, or
    /// repeating an earlier id, are skipped so the rest of the catalog stays usable.
    pub fn from_jobs(records: Vec<JobPosting>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut jobs = Vec::with_capacity(records.len());
        for (position, job) in records.into_iter().enumerate() {
            if job.id == MISSING_ID {
                warn!("Skipping job record at position {position}: no id");
                continue;
            }
            if !seen.insert(job.id) {
                warn!("Skipping job record at position {position}: duplicate id {}", job.id);
                continue;
            }
            if job.salary_min > job.salary_max {
                warn!(
                    "Job {} has salary_min {} above salary_max {}",
                    job.id, job.salary_min, job.salary_max
                );
            }
            jobs.push(job);
        }
        Self { jobs }
    }

    /// Loads strictly: any source failure is returned.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let catalog = Self::from_jobs(source.load().await?);
        info!("Loaded {} jobs from {}", catalog.len(), source.describe());
        Ok(catalog)
    }

    /// Loads, falling back to an empty catalog so the service can still boot.
    /// The failure is logged and handed back to the initializing caller.
    pub async fn load_or_empty(source: &dyn CatalogSource) -> (Self, Option<CatalogError>) {
        match Self::load(source).await {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                error!(
                    "Failed to load catalog from {}: {e}. Starting with an empty catalog",
                    source.describe()
                );
                (Self::default(), Some(e))
            }
        }
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Distinct non-empty locations, ascending.
    pub fn unique_locations(&self) -> Vec<String> {
        self.jobs
            .iter()
            .filter(|j| !j.location.is_empty())
            .map(|j| j.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every job satisfying all supplied criteria, in catalog order.
    pub fn filter(&self, criteria: &JobFilter) -> CatalogView<'_> {
        let rows = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| criteria.accepts(job))
            .map(|(row, _)| row)
            .collect();
        CatalogView { catalog: self, rows }
    }

    /// The whole catalog as a view.
    pub fn all(&self) -> CatalogView<'_> {
        CatalogView {
            catalog: self,
            rows: (0..self.jobs.len()).collect(),
        }
    }
}

/// A row-order-preserving subset of a catalog.
///
/// Carries row positions rather than copies so scoring can reuse the index rows
/// built for this exact catalog.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    catalog: &'a JobCatalog,
    rows: Vec<usize>,
}

impl<'a> CatalogView<'a> {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (row, job) pairs in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'a JobPosting)> + '_ {
        let jobs = self.catalog.jobs();
        self.rows.iter().map(move |&row| (row, &jobs[row]))
    }

    pub fn jobs(&self) -> impl Iterator<Item = &'a JobPosting> + '_ {
        self.entries().map(|(_, job)| job)
    }

    /// Whether this view was taken from `catalog` (same instance, not an equal copy).
    pub fn belongs_to(&self, catalog: &JobCatalog) -> bool {
        std::ptr::eq(self.catalog, catalog)
    }
}
