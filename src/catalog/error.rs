//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons the catalog document could not be used.
///
/// These never reach the customer: [`CatalogIndex::load_or_fallback`](super::CatalogIndex::load_or_fallback)
/// logs them and serves the built-in menu instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}
