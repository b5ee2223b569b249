//! Caller context threaded into every tool invocation.

use uuid::Uuid;

/// Identifies who is speaking when a tool runs.
///
/// The user id comes from the session binding, never from the arguments the
/// interpreter produced, so a request cannot act on someone else's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    /// The conversation session this invocation belongs to.
    pub session_id: Uuid,
    /// The authenticated user the session is bound to.
    pub user_id: String,
}

impl ToolContext {
    pub fn new(session_id: Uuid, user_id: impl Into<String>) -> Self {
        Self {
            session_id,
            user_id: user_id.into(),
        }
    }
}
