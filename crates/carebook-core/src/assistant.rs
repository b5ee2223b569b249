//! Conversational dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};
use parking_lot::RwLock;

use carebook_tools::{ToolContext, ToolRegistry};

use crate::dates;
use crate::error::AssistantError;
use crate::interpreter::{Interpreter, InterpreterStep, ToolObservation, TurnContext};
use crate::transcript::Transcript;
use crate::types::{ConversationTurn, Role, SessionId};

/// Keywords that gate natural-date detection.
pub const DEFAULT_SCHEDULING_KEYWORDS: [&str; 3] = ["appointment", "schedule", "book"];

/// Per-turn ceiling on interpreter tool requests.
pub const DEFAULT_MAX_TOOL_STEPS: usize = 8;

/// Drives conversations: binds sessions to users, runs the interpreter
/// step loop against the tool registry, and keeps the per-user transcript.
///
/// A session is bound to the first user id it speaks as; later messages on
/// the same session act as that user regardless of what the request claims.
pub struct Assistant {
    interpreter: Arc<dyn Interpreter>,
    tools: Arc<ToolRegistry>,
    transcript: Transcript,
    sessions: RwLock<HashMap<SessionId, String>>,
    max_tool_steps: usize,
    scheduling_keywords: Vec<String>,
}

impl Assistant {
    pub fn new(interpreter: Arc<dyn Interpreter>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            interpreter,
            tools,
            transcript: Transcript::new(),
            sessions: RwLock::new(HashMap::new()),
            max_tool_steps: DEFAULT_MAX_TOOL_STEPS,
            scheduling_keywords: DEFAULT_SCHEDULING_KEYWORDS
                .iter()
                .map(|kw| kw.to_string())
                .collect(),
        }
    }

    /// Override the per-turn tool step ceiling.
    pub fn with_max_tool_steps(mut self, max: usize) -> Self {
        self.max_tool_steps = max;
        self
    }

    /// Override the keywords that gate date detection.
    pub fn with_scheduling_keywords(mut self, keywords: Vec<String>) -> Self {
        self.scheduling_keywords = keywords;
        self
    }

    /// Pre-bind a session to a user.
    pub fn bind_session(&self, session_id: SessionId, user_id: impl Into<String>) {
        self.sessions.write().insert(session_id, user_id.into());
    }

    /// Conversation history for a user, oldest first.
    pub fn history(&self, user_id: &str) -> Vec<ConversationTurn> {
        self.transcript.history(user_id)
    }

    /// Record an exchange that happened outside the interpreter loop, such
    /// as an image analysis.
    pub fn note_exchange(&self, user_id: &str, user_text: &str, assistant_text: &str) {
        self.transcript.append(user_id, Role::User, user_text);
        self.transcript.append(user_id, Role::Assistant, assistant_text);
    }

    /// Process one inbound message and return the assistant's reply.
    pub async fn handle_message(
        &self,
        session_id: SessionId,
        user_id: &str,
        input: &str,
    ) -> Result<String, AssistantError> {
        self.handle_message_at(session_id, user_id, input, Local::now().naive_local())
            .await
    }

    async fn handle_message_at(
        &self,
        session_id: SessionId,
        user_id: &str,
        input: &str,
        now: NaiveDateTime,
    ) -> Result<String, AssistantError> {
        let user_id = self.resolve_user(session_id, user_id);

        let detected_date = if dates::mentions_scheduling(input, &self.scheduling_keywords) {
            dates::detect_date(input, now)
        } else {
            None
        };
        let ctx = TurnContext {
            user_id: user_id.clone(),
            current_date: now,
            history: self.transcript.history(&user_id),
            input: input.to_string(),
            detected_date,
        };
        let tool_ctx = ToolContext::new(session_id, user_id.clone());
        let specs = self.tools.specs();

        let mut observations: Vec<ToolObservation> = Vec::new();
        for _ in 0..self.max_tool_steps {
            match self.interpreter.step(&ctx, &specs, &observations).await? {
                InterpreterStep::ToolCall { name, arguments } => {
                    let output = match self.tools.dispatch(&name, &tool_ctx, arguments).await {
                        Ok(text) => text,
                        // Dispatch plumbing failures go back to the
                        // interpreter as text so it can recover or apologize.
                        Err(err) => {
                            warn!("tool dispatch failed (tool={name}): {err}");
                            format!("Tool error: {err}")
                        }
                    };
                    debug!(
                        "tool step complete (session_id={session_id}, tool={name}, output_len={})",
                        output.len()
                    );
                    observations.push(ToolObservation { tool: name, output });
                }
                InterpreterStep::Reply(reply) => {
                    info!(
                        "turn complete (session_id={session_id}, user_id={user_id}, tool_steps={})",
                        observations.len()
                    );
                    self.transcript.append(&user_id, Role::User, input);
                    self.transcript.append(&user_id, Role::Assistant, &reply);
                    return Ok(reply);
                }
            }
        }
        warn!(
            "tool step budget exhausted (session_id={session_id}, user_id={user_id}, budget={})",
            self.max_tool_steps
        );
        Err(AssistantError::StepBudgetExhausted(self.max_tool_steps))
    }

    /// Session binding wins over the request-supplied id; unbound sessions
    /// are bound to the id they first speak as.
    fn resolve_user(&self, session_id: SessionId, user_id: &str) -> String {
        let mut sessions = self.sessions.write();
        sessions
            .entry(session_id)
            .or_insert_with(|| user_id.to_string())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carebook_protocol::{ToolError, UpstreamError};
    use carebook_tools::{Tool, ToolSpec};
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use uuid::Uuid;

    /// Replays a fixed sequence of steps.
    struct ScriptedInterpreter {
        steps: Mutex<VecDeque<Result<InterpreterStep, UpstreamError>>>,
        seen: Mutex<Vec<(Option<NaiveDateTime>, Vec<ToolObservation>)>>,
    }

    impl ScriptedInterpreter {
        fn new(steps: Vec<Result<InterpreterStep, UpstreamError>>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
                seen: Mutex::new(Vec::new()),
            })
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
            self.seen
                .lock()
                .push((ctx.detected_date, observations.to_vec()));
            self.steps
                .lock()
                .pop_front()
                .unwrap_or(Err(UpstreamError::Unavailable("script exhausted".into())))
        }
    }

    /// Reports the user id the tool context carries.
    struct WhoAmITool;

    #[async_trait]
    impl Tool for WhoAmITool {
        fn name(&self) -> &str {
            "whoami"
        }

        fn description(&self) -> &str {
            "Reports the acting user."
        }

        fn args_schema(&self) -> Value {
            json!({ "type": "object", "properties": {} })
        }

        async fn call(&self, ctx: &ToolContext, _args: Value) -> Result<String, ToolError> {
            Ok(format!("acting as {}", ctx.user_id))
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 9, 14)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time")
    }

    fn registry() -> Arc<ToolRegistry> {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(WhoAmITool));
        Arc::new(registry)
    }

    #[tokio::test]
    async fn reply_is_appended_after_the_user_turn() {
        let interpreter =
            ScriptedInterpreter::new(vec![Ok(InterpreterStep::Reply("Hello Alice".into()))]);
        let assistant = Assistant::new(interpreter, registry());

        let reply = assistant
            .handle_message_at(Uuid::new_v4(), "alice", "hi", now())
            .await
            .expect("turn should succeed");
        assert_eq!(reply, "Hello Alice");

        let history = assistant.history("alice");
        assert_eq!(history.len(), 2);
        assert_eq!((history[0].role, history[0].content.as_str()), (Role::User, "hi"));
        assert_eq!(
            (history[1].role, history[1].content.as_str()),
            (Role::Assistant, "Hello Alice")
        );
    }

    #[tokio::test]
    async fn tool_output_is_fed_back_as_an_observation() {
        let interpreter = ScriptedInterpreter::new(vec![
            Ok(InterpreterStep::ToolCall {
                name: "whoami".into(),
                arguments: json!({}),
            }),
            Ok(InterpreterStep::Reply("done".into())),
        ]);
        let assistant = Assistant::new(interpreter.clone(), registry());

        assistant
            .handle_message_at(Uuid::new_v4(), "alice", "who am I?", now())
            .await
            .expect("turn should succeed");

        let seen = interpreter.seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, vec![]);
        assert_eq!(
            seen[1].1,
            vec![ToolObservation {
                tool: "whoami".into(),
                output: "acting as alice".into(),
            }]
        );
    }

    #[tokio::test]
    async fn session_binding_wins_over_the_request_id() {
        let interpreter = ScriptedInterpreter::new(vec![
            Ok(InterpreterStep::ToolCall {
                name: "whoami".into(),
                arguments: json!({}),
            }),
            Ok(InterpreterStep::Reply("ok".into())),
        ]);
        let assistant = Assistant::new(interpreter.clone(), registry());
        let session = Uuid::new_v4();
        assistant.bind_session(session, "alice");

        assistant
            .handle_message_at(session, "mallory", "who am I?", now())
            .await
            .expect("turn should succeed");

        let seen = interpreter.seen.lock();
        assert_eq!(seen[1].1[0].output, "acting as alice");
        // The exchange lands under the bound user, not the claimed one.
        assert_eq!(assistant.history("alice").len(), 2);
        assert_eq!(assistant.history("mallory").len(), 0);
    }

    #[tokio::test]
    async fn unknown_tool_becomes_an_observation_not_a_failure() {
        let interpreter = ScriptedInterpreter::new(vec![
            Ok(InterpreterStep::ToolCall {
                name: "bogus".into(),
                arguments: json!({}),
            }),
            Ok(InterpreterStep::Reply("sorry".into())),
        ]);
        let assistant = Assistant::new(interpreter.clone(), registry());

        let reply = assistant
            .handle_message_at(Uuid::new_v4(), "alice", "hi", now())
            .await
            .expect("turn should succeed");
        assert_eq!(reply, "sorry");

        let seen = interpreter.seen.lock();
        assert!(seen[1].1[0].output.starts_with("Tool error:"));
    }

    #[tokio::test]
    async fn date_detection_is_gated_on_scheduling_keywords() {
        let interpreter = ScriptedInterpreter::new(vec![
            Ok(InterpreterStep::Reply("a".into())),
            Ok(InterpreterStep::Reply("b".into())),
        ]);
        let assistant = Assistant::new(interpreter.clone(), registry());
        let session = Uuid::new_v4();

        assistant
            .handle_message_at(session, "alice", "book me tomorrow at 3pm", now())
            .await
            .expect("turn should succeed");
        assistant
            .handle_message_at(session, "alice", "see you tomorrow at 3pm", now())
            .await
            .expect("turn should succeed");

        let seen = interpreter.seen.lock();
        assert_eq!(
            seen[0].0,
            NaiveDate::from_ymd_opt(2026, 9, 15)
                .expect("valid date")
                .and_hms_opt(15, 0, 0)
        );
        assert_eq!(seen[1].0, None);
    }

    #[tokio::test]
    async fn interpreter_failure_leaves_no_transcript_entry() {
        let interpreter = ScriptedInterpreter::new(vec![Err(UpstreamError::Unavailable(
            "model offline".into(),
        ))]);
        let assistant = Assistant::new(interpreter, registry());

        let err = assistant
            .handle_message_at(Uuid::new_v4(), "alice", "hi", now())
            .await
            .expect_err("turn should fail");
        assert!(matches!(err, AssistantError::Upstream(_)));
        assert_eq!(assistant.history("alice").len(), 0);
    }

    #[tokio::test]
    async fn endless_tool_calls_hit_the_step_budget() {
        let steps = (0..4)
            .map(|_| {
                Ok(InterpreterStep::ToolCall {
                    name: "whoami".into(),
                    arguments: json!({}),
                })
            })
            .collect();
        let interpreter = ScriptedInterpreter::new(steps);
        let assistant = Assistant::new(interpreter, registry()).with_max_tool_steps(3);

        let err = assistant
            .handle_message_at(Uuid::new_v4(), "alice", "hi", now())
            .await
            .expect_err("turn should fail");
        assert!(matches!(err, AssistantError::StepBudgetExhausted(3)));
        assert_eq!(assistant.history("alice").len(), 0);
    }
}
