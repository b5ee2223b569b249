//! Dispatcher errors.

use carebook_protocol::UpstreamError;
use thiserror::Error;

/// Failure of a conversational turn.
///
/// Lifecycle rule violations never appear here: the tools render those as
/// user-facing text and the turn still succeeds.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The interpreter (or another upstream collaborator) failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The interpreter kept requesting tools past the per-turn step budget.
    #[error("tool step budget exhausted after {0} steps")]
    StepBudgetExhausted(usize),
}
