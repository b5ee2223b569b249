//! Error types for store operations.

/// Errors returned by appointment store backends.
///
/// The in-memory backend never fails, but the trait stays fallible so other
/// backends can report real errors without changing callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error from a persistent backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
