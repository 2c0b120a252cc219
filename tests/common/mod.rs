//! Shared test fixtures: a recording mock backend and router construction.

#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use cvg::{
    clients::{InferenceBackend, InferenceError, InferenceResult},
    config::GatewayConfig,
    server::{build_router, AppState},
};

/// One invocation observed by the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Complete { prompt: String },
    Analyze { image_b64: String, prompt: String },
}

/// Test double for the inference backend. Records every call and returns
/// either a canned reply or a deterministic failure.
pub struct MockBackend {
    reply: String,
    fail: bool,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<InferenceResult, InferenceError> {
        if self.fail {
            Err(InferenceError::Api {
                status: reqwest::StatusCode::UNAUTHORIZED,
                body: "simulated transport error".to_string(),
            })
        } else {
            Ok(InferenceResult {
                text: self.reply.clone(),
            })
        }
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn complete(&self, prompt: &str) -> Result<InferenceResult, InferenceError> {
        self.calls.lock().unwrap().push(RecordedCall::Complete {
            prompt: prompt.to_string(),
        });
        self.outcome()
    }

    async fn analyze(
        &self,
        image_b64: &str,
        prompt: &str,
    ) -> Result<InferenceResult, InferenceError> {
        self.calls.lock().unwrap().push(RecordedCall::Analyze {
            image_b64: image_b64.to_string(),
            prompt: prompt.to_string(),
        });
        self.outcome()
    }
}

pub fn test_config(upload_dir: &Path) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_key: "sk-test".to_string(),
        base_url: "http://unused.invalid/v1".to_string(),
        text_model: "test-text-model".to_string(),
        vision_model: "test-vision-model".to_string(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
        upload_dir: PathBuf::from(upload_dir),
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

pub fn test_app(backend: Arc<MockBackend>, upload_dir: &Path) -> Router {
    let state = AppState::new(backend, Arc::new(test_config(upload_dir)));
    build_router(state)
}
