//! Error types for the catalog indexer repository.

mod repository_error;
mod sink_error;

pub use repository_error::RepositoryError;
pub use sink_error::SinkError;
