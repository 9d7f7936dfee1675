mod catalog;
mod config;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{CatalogSource, JsonFileSource};
use crate::config::Config;
use crate::matching::MatcherHandle;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load catalog and build the relevance index. A bad source still boots.
    let source: Arc<dyn CatalogSource> = Arc::new(JsonFileSource::new(config.jobs_path.clone()));
    let (matcher, load_error) = MatcherHandle::initialize(source, config.match_settings).await;
    if let Some(e) = load_error {
        warn!("Serving an empty catalog until reload: {e}");
    }
    let current = matcher.current();
    if current.catalog().is_empty() {
        warn!("Catalog is empty; every match request will return no results");
    }
    info!(
        "Matcher ready: {} jobs, {} terms (max_features={}, min_similarity={}, max_results={})",
        current.catalog().len(),
        current.index().vocabulary_len(),
        config.match_settings.max_features,
        config.match_settings.min_similarity,
        config.match_settings.max_results
    );

    // Build app state
    let state = AppState {
        matcher: Arc::new(matcher),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
