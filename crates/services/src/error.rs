//! Shared error types for the services crate.

use thiserror::Error;

use triage_core::GraphError;

/// Errors emitted while loading quiz content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid content document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
