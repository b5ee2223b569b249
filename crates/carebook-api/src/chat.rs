//! Handler for `POST /chat`.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// JSON body accepted by `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

/// Reply payload shared by the chat and voice endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    /// Set by the voice endpoint only.
    pub transcribed_text: Option<String>,
}

/// `POST /chat` — one conversational turn for `user_id`.
pub async fn handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state
        .assistant
        .handle_message(Uuid::new_v4(), &body.user_id, &body.message)
        .await?;
    Ok(Json(ChatResponse {
        response,
        transcribed_text: None,
    }))
}
