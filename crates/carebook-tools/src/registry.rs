//! Registry of tools available to a conversation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use carebook_protocol::ToolError;
use serde_json::Value;

use crate::context::ToolContext;
use crate::tool::{Tool, ToolSpec};

/// Thread-safe collection of tools, looked up by name at dispatch time.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name, replacing any previous entry.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.write().insert(name.clone(), tool).is_some() {
            log::warn!("tool replaced in registry (name={name})");
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// Names of all registered tools, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Specs of all registered tools, sorted by name.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.read().values().map(|t| t.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Dispatch a call to the named tool.
    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &ToolContext,
        args: Value,
    ) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        log::debug!(
            "dispatching tool (name={}, session_id={})",
            name,
            ctx.session_id
        );
        tool.call(ctx, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the text argument back."
        }

        fn args_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            })
        }

        async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
            let text = args
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::InvalidArguments("missing text".into()))?;
            Ok(text.to_string())
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(Uuid::new_v4(), "alice")
    }

    #[tokio::test]
    async fn dispatches_registered_tool() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let out = registry
            .dispatch("echo", &ctx(), json!({ "text": "hi" }))
            .await
            .expect("dispatch should succeed");
        assert_eq!(out, "hi");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch("missing", &ctx(), json!({}))
            .await
            .expect_err("dispatch should fail");
        assert!(matches!(err, ToolError::ToolNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn specs_are_sorted_by_name() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        let specs = registry.specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "echo");
    }
}
