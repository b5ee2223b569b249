//! Handlers for the voice and image endpoints.
//!
//! Both take the raw upload as the request body; metadata rides in the
//! query string. The backends are optional collaborators on [`AppState`];
//! when one is absent its endpoint reports an upstream failure.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::ChatResponse;
use crate::{AppState, error::ApiError};

/// Prompt used when an image upload does not supply one.
const DEFAULT_IMAGE_PROMPT: &str = "What do you see in this medical image?";

/// Query accepted by `POST /voice`.
#[derive(Debug, Deserialize)]
pub struct VoiceParams {
    pub user_id: String,
    /// Container or codec hint for the upload ("wav", "mp3", ...).
    pub format: Option<String>,
}

/// `POST /voice?user_id=...[&format=...]` — transcribe the audio body and
/// run the text through the assistant, echoing the transcription back.
pub async fn voice(
    State(state): State<AppState>,
    Query(params): Query<VoiceParams>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }
    let transcriber = state
        .transcriber
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("transcription backend not configured".to_string()))?;

    let format = params.format.as_deref().unwrap_or("wav");
    let text = transcriber.transcribe(&body, format).await?;
    let response = state
        .assistant
        .handle_message(Uuid::new_v4(), &params.user_id, &text)
        .await?;
    Ok(Json(ChatResponse {
        response,
        transcribed_text: Some(text),
    }))
}

/// Query accepted by `POST /image`.
#[derive(Debug, Deserialize)]
pub struct ImageParams {
    pub user_id: String,
    pub prompt: Option<String>,
}

/// Analysis payload returned by `POST /image`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageAnalysisResponse {
    pub analysis: String,
}

/// `POST /image?user_id=...[&prompt=...]` — analyze the image body and
/// record the exchange in the user's conversation log.
pub async fn image(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
    body: Bytes,
) -> Result<Json<ImageAnalysisResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }
    let vision = state
        .vision
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("image analysis backend not configured".to_string()))?;

    let prompt = params.prompt.as_deref().unwrap_or(DEFAULT_IMAGE_PROMPT);
    let analysis = vision.analyze(&body, prompt).await?;
    state.assistant.note_exchange(
        &params.user_id,
        &format!("[Uploaded an image with prompt: {prompt}]"),
        &format!("[Image analysis]: {analysis}"),
    );
    Ok(Json(ImageAnalysisResponse { analysis }))
}
