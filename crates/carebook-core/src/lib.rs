//! Conversational core of Carebook.
//!
//! Hosts the [`Assistant`] dispatcher: session binding, the interpreter
//! step loop over the tool registry, per-user transcripts, and best-effort
//! natural-date detection. Language understanding and media handling live
//! behind the [`Interpreter`], [`Transcriber`], and [`VisionAnalyzer`]
//! seams so the core stays deterministic and testable.

mod assistant;
mod collaborators;
pub mod dates;
mod error;
mod interpreter;
mod transcript;
mod types;

/// The conversational dispatcher.
pub use assistant::{Assistant, DEFAULT_MAX_TOOL_STEPS, DEFAULT_SCHEDULING_KEYWORDS};
/// Media collaborator seams.
pub use collaborators::{Transcriber, VisionAnalyzer};
/// Dispatcher errors.
pub use error::AssistantError;
/// Interpreter seam and turn types.
pub use interpreter::{Interpreter, InterpreterStep, ToolObservation, TurnContext};
/// Per-user conversation log.
pub use transcript::Transcript;
/// Conversation domain types.
pub use types::{ConversationTurn, Role, SessionId};
