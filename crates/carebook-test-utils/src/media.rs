use async_trait::async_trait;

use carebook_core::{Transcriber, VisionAnalyzer};
use carebook_protocol::UpstreamError;

/// Transcriber that returns a fixed text for any audio.
pub struct FixedTranscriber {
    text: String,
}

impl FixedTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio: &[u8], _format_hint: &str) -> Result<String, UpstreamError> {
        Ok(self.text.clone())
    }
}

/// Vision analyzer that returns a fixed analysis for any image.
pub struct FixedVision {
    analysis: String,
}

impl FixedVision {
    pub fn new(analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
        }
    }
}

#[async_trait]
impl VisionAnalyzer for FixedVision {
    async fn analyze(&self, _image: &[u8], _prompt: &str) -> Result<String, UpstreamError> {
        Ok(self.analysis.clone())
    }
}

/// Transcriber that always reports the backend as down.
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio: &[u8], _format_hint: &str) -> Result<String, UpstreamError> {
        Err(UpstreamError::Unavailable("transcriber offline".into()))
    }
}
