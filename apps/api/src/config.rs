use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::MatchSettings;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub match_settings: MatchSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchSettings::default();
        let config = Config {
            jobs_path: std::env::var("JOBS_PATH")
                .unwrap_or_else(|_| "data/jobs_database.json".to_string())
                .into(),
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_settings: MatchSettings {
                max_features: parse_env("MAX_FEATURES", defaults.max_features)?,
                min_similarity: parse_env("MIN_SIMILARITY", defaults.min_similarity)?,
                max_results: parse_env("MAX_RESULTS", defaults.max_results)?,
            },
        };
        config
            .match_settings
            .validate()
            .context("Invalid matching settings")?;
        Ok(config)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}"))
}
