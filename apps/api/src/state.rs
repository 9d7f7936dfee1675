use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatcherHandle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Current (catalog, index) pair; handlers take a snapshot per request.
    pub matcher: Arc<MatcherHandle>,
    pub config: Config,
}
