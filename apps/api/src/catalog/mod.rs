// Catalog Store: the immutable, ordered job list and its structured filters.
// Row positions here are the row positions of the relevance index.

pub mod handlers;
pub mod source;
pub mod store;

pub use source::{CatalogError, CatalogSource, JsonFileSource};
#[cfg(test)]
pub use source::StaticSource;
pub use store::{CatalogView, JobCatalog, JobFilter};
