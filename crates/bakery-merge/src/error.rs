//! Error types for the merge crate.

use bakery_rack::RackError;

/// Errors that can occur while applying patch operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The target rack rejected an operation.
    #[error("rack error: {0}")]
    Rack(#[from] RackError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
