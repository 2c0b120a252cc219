//! Outbound model invocation clients.
//!
//! The routers depend on the [`InferenceBackend`] capability trait, not on a
//! concrete client, so a test double can stand in for the real endpoint.

mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;

/// Generated text from a single model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub text: String,
}

/// Failure of an outbound model invocation.
///
/// Full detail is for operator logs only. The routers collapse every variant
/// into one fixed client-facing message per pipeline.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Capability contract for the two inference pipelines.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// One text completion for a chat message.
    async fn complete(&self, prompt: &str) -> Result<InferenceResult, InferenceError>;

    /// Multimodal analysis of a base64-encoded image with a text prompt.
    async fn analyze(
        &self,
        image_b64: &str,
        prompt: &str,
    ) -> Result<InferenceResult, InferenceError>;
}
