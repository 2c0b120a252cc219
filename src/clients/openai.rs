//! OpenAI-compatible chat completion client.
//!
//! One client instance serves both pipelines with distinct model
//! identifiers; sampling parameters are fixed.

use async_trait::async_trait;
use chat_protocol::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
};
use tracing::debug;

use super::{InferenceBackend, InferenceError, InferenceResult};
use crate::{config::GatewayConfig, media};

/// Sampling temperature for both pipelines.
const TEMPERATURE: f32 = 0.7;

/// Output length bound for both pipelines.
const MAX_TOKENS: u32 = 1024;

/// Returned when the endpoint yields no candidate content.
const EMPTY_COMPLETION_PLACEHOLDER: &str = "No response generated.";

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    text_model: String,
    vision_model: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
        }
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<InferenceResult, InferenceError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %request.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        debug!(id = %completion.id, "received chat completion response");

        Ok(InferenceResult {
            text: completion_text(&completion),
        })
    }
}

#[async_trait]
impl InferenceBackend for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<InferenceResult, InferenceError> {
        self.send(&text_request(&self.text_model, prompt)).await
    }

    async fn analyze(
        &self,
        image_b64: &str,
        prompt: &str,
    ) -> Result<InferenceResult, InferenceError> {
        self.send(&vision_request(&self.vision_model, image_b64, prompt))
            .await
    }
}

/// First candidate's text, or the fixed placeholder when there is none.
fn completion_text(completion: &ChatCompletionResponse) -> String {
    completion
        .first_content()
        .map(str::to_owned)
        .unwrap_or_else(|| EMPTY_COMPLETION_PLACEHOLDER.to_string())
}

fn text_request(model: &str, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(prompt)],
        temperature: Some(TEMPERATURE),
        max_tokens: Some(MAX_TOKENS),
    }
}

fn vision_request(model: &str, image_b64: &str, prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user_parts(vec![
            ContentPart::Text {
                text: prompt.to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: media::jpeg_data_uri(image_b64),
                    detail: None,
                },
            },
        ])],
        temperature: Some(TEMPERATURE),
        max_tokens: Some(MAX_TOKENS),
    }
}
