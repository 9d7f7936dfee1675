//! Catalog sources — where the ordered job records come from.
//!
//! The store only needs `load() -> Vec<JobPosting>`; file layout and dataset
//! generation live outside this service.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::job::JobPosting;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog source not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog build task failed: {0}")]
    Build(String),
}

/// Provider of an ordered sequence of job records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<JobPosting>, CatalogError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// A JSON array of job records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<JobPosting>, CatalogError> {
        debug!("Reading catalog from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CatalogError::NotFound {
                    path: self.path.clone(),
                },
                _ => CatalogError::Io {
                    path: self.path.clone(),
                    source: e,
                },
            })?;
        parse_records(&raw, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records held in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<JobPosting>);

#[cfg(test)]
#[async_trait]
impl CatalogSource for StaticSource {
    async fn load(&self) -> Result<Vec<JobPosting>, CatalogError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.0.len())
    }
}

/// Parses a JSON array of job records.
pub fn parse_records(raw: &str, origin: &str) -> Result<Vec<JobPosting>, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })
}
