//! The tool abstraction exposed to the conversational interpreter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use carebook_protocol::ToolError;

use crate::context::ToolContext;

/// A serializable description of a tool, handed to the interpreter so it
/// knows what it may call and with which arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSpec {
    /// Stable tool name used in dispatch requests.
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON schema for the tool's arguments object.
    pub args_schema: Value,
}

/// A callable capability of the assistant.
///
/// Implementations receive the caller context plus a JSON arguments object
/// and return a user-facing text result. Domain rule violations are reported
/// as ordinary text (the interpreter relays them to the user); only malformed
/// arguments or unknown tools surface as [`ToolError`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable name used to address this tool in dispatch requests.
    fn name(&self) -> &str;

    /// One-line description shown to the interpreter.
    fn description(&self) -> &str;

    /// JSON schema for the arguments object.
    fn args_schema(&self) -> Value;

    /// Execute the tool with the given context and arguments.
    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<String, ToolError>;

    /// Full spec for this tool.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            args_schema: self.args_schema(),
        }
    }
}

/// Deserialize a tool's arguments object into a typed struct, mapping
/// failures to [`ToolError::InvalidArguments`].
pub fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
