//! Upstream media collaborators.

use async_trait::async_trait;

use carebook_protocol::UpstreamError;

/// Converts recorded audio into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio bytes; `format_hint` is the container or codec
    /// name taken from the upload ("wav", "mp3", ...).
    async fn transcribe(&self, audio: &[u8], format_hint: &str) -> Result<String, UpstreamError>;
}

/// Produces a textual analysis of an image.
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    async fn analyze(&self, image: &[u8], prompt: &str) -> Result<String, UpstreamError>;
}
