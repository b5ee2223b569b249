//! JSON REST API for Carebook.
//!
//! Exposes an axum [`Router`] over the assistant and the scheduling
//! service. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = carebook_api::api_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod appointments;
pub mod chat;
pub mod error;
pub mod media;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use carebook_core::{Assistant, Transcriber, VisionAnalyzer};
use carebook_scheduling::SchedulingService;

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub scheduling: Arc<SchedulingService>,
    /// Voice transcription backend, when one is configured.
    pub transcriber: Option<Arc<dyn Transcriber>>,
    /// Image analysis backend, when one is configured.
    pub vision: Option<Arc<dyn VisionAnalyzer>>,
}

impl AppState {
    pub fn new(assistant: Arc<Assistant>, scheduling: Arc<SchedulingService>) -> Self {
        Self {
            assistant,
            scheduling,
            transcriber: None,
            vision: None,
        }
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_vision(mut self, vision: Arc<dyn VisionAnalyzer>) -> Self {
        self.vision = Some(vision);
        self
    }
}

/// Build a fully-materialised API router for `state`.
pub fn api_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat::handler))
        .route("/appointments", post(appointments::create))
        // The path parameter is a user id for GET and an appointment id
        // for PUT and DELETE, mirroring the public contract.
        .route(
            "/appointments/{id}",
            get(appointments::list)
                .put(appointments::update)
                .delete(appointments::delete),
        )
        .route("/voice", post(media::voice))
        .route("/image", post(media::image))
        .with_state(state)
}

/// `GET /health`
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
