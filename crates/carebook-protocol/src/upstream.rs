//! Errors surfaced by external collaborators.

/// Failure of an external collaborator (interpreter, transcriber, vision).
///
/// Surfaced to the caller as a failure of the enclosing request; lifecycle
/// mutations already committed before the upstream call are never undone.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The collaborator could not be reached.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    /// The collaborator rejected the request.
    #[error("upstream rejected request: {0}")]
    Rejected(String),
}
