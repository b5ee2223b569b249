//! Per-user conversation log.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::types::{ConversationTurn, Role};

/// Append-only, insertion-ordered conversation history keyed by user id.
///
/// Unbounded; the caller decides how much of the history to surface.
#[derive(Default)]
pub struct Transcript {
    inner: RwLock<HashMap<String, Vec<ConversationTurn>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a turn for the given user.
    pub fn append(&self, user_id: &str, role: Role, content: impl Into<String>) {
        self.inner
            .write()
            .entry(user_id.to_string())
            .or_default()
            .push(ConversationTurn::new(role, content));
    }

    /// Full history for a user, oldest first. Unknown users have none.
    pub fn history(&self, user_id: &str) -> Vec<ConversationTurn> {
        self.inner.read().get(user_id).cloned().unwrap_or_default()
    }
}
