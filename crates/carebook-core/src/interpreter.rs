//! The language-understanding seam of the assistant.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;

use carebook_protocol::UpstreamError;
use carebook_tools::ToolSpec;

use crate::types::ConversationTurn;

/// Everything the interpreter sees about the current turn.
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Effective user for this turn (session binding already applied).
    pub user_id: String,
    /// Wall-clock reference for relative date talk.
    pub current_date: NaiveDateTime,
    /// Prior conversation with this user, oldest first.
    pub history: Vec<ConversationTurn>,
    /// The inbound message.
    pub input: String,
    /// Datetime detected in the message, when one was found.
    pub detected_date: Option<NaiveDateTime>,
}

/// A tool's output as fed back to the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolObservation {
    /// Name of the tool that ran.
    pub tool: String,
    /// Its user-facing output (or rendered error) text.
    pub output: String,
}

/// One decision of the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterStep {
    /// Invoke the named tool with the given arguments object.
    ToolCall { name: String, arguments: Value },
    /// The final text answer for this turn.
    Reply(String),
}

/// Turns a conversation state into the next action.
///
/// Implementations are typically backed by a remote language model; they
/// see the turn context, the specs of the available tools, and the
/// observations accumulated so far in this turn.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn step(
        &self,
        ctx: &TurnContext,
        tools: &[ToolSpec],
        observations: &[ToolObservation],
    ) -> Result<InterpreterStep, UpstreamError>;
}
