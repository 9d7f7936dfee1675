// Relevance Index and the JobMatcher service that pairs it with a catalog.

pub mod handle;
pub mod handlers;
pub mod index;
pub mod matcher;
pub mod tokenize;

pub use handle::MatcherHandle;
pub use matcher::MatchSettings;
