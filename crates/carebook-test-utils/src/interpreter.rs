use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use carebook_core::{Interpreter, InterpreterStep, ToolObservation, TurnContext};
use carebook_protocol::UpstreamError;
use carebook_tools::ToolSpec;

/// Interpreter that replays a fixed sequence of steps and records what it
/// was shown.
pub struct ScriptedInterpreter {
    steps: Mutex<VecDeque<Result<InterpreterStep, UpstreamError>>>,
    contexts: Mutex<Vec<TurnContext>>,
    observations: Mutex<Vec<Vec<ToolObservation>>>,
}

impl ScriptedInterpreter {
    pub fn new(steps: Vec<Result<InterpreterStep, UpstreamError>>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            contexts: Mutex::new(Vec::new()),
            observations: Mutex::new(Vec::new()),
        })
    }

    /// Interpreter that answers every turn with the same reply.
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        let text = text.into();
        Self::new(
            (0..8)
                .map(|_| Ok(InterpreterStep::Reply(text.clone())))
                .collect(),
        )
    }

    /// Turn contexts seen so far, in call order.
    pub fn contexts(&self) -> Vec<TurnContext> {
        self.contexts.lock().clone()
    }

    /// Observation slices seen so far, one per step call.
    pub fn observations(&self) -> Vec<Vec<ToolObservation>> {
        self.observations.lock().clone()
    }
}

#[async_trait]
impl Interpreter for ScriptedInterpreter {
    async fn step(
        &self,
        ctx: &TurnContext,
        _tools: &[ToolSpec],
        observations: &[ToolObservation],
    ) -> Result<InterpreterStep, UpstreamError> {
        self.contexts.lock().push(ctx.clone());
        self.observations.lock().push(observations.to_vec());
        self.steps
            .lock()
            .pop_front()
            .unwrap_or(Err(UpstreamError::Unavailable("script exhausted".into())))
    }
}
