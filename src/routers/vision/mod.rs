//! Vision pipeline: `POST /api/vision/analyze`.
//!
//! Multipart extraction persists the upload first, then a small state
//! machine drives Validate → Encode → Dispatch → Cleanup → Respond.
//! One function, one loop, one match.

mod state;
mod steps;

use axum::{
    extract::{Multipart, State},
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use self::state::{RequestState, StepResult};
use crate::{
    clients::InferenceResult,
    media::UploadArtifact,
    routers::error,
    server::AppState,
};

/// Prompt used when the request carries none (or only whitespace).
pub const DEFAULT_PROMPT: &str = "What's in this image?";

#[derive(Debug, Serialize)]
pub struct VisionReply {
    analysis: String,
    timestamp: DateTime<Utc>,
}

/// Where the pipeline failed. Detail is logged at the failure site; the
/// client sees only the fixed vision-pipeline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PipelineFailure {
    Encode,
    Inference,
}

/// Per-request mutable state passed through the state machine.
pub(crate) struct VisionContext {
    pub app: AppState,
    pub state: RequestState,
    pub artifact: Option<UploadArtifact>,
    pub prompt: String,
    pub encoded: Option<String>,
    pub outcome: Option<Result<InferenceResult, PipelineFailure>>,
}

pub async fn handle_analyze(State(app): State<AppState>, mut multipart: Multipart) -> Response {
    let mut artifact: Option<UploadArtifact> = None;
    let mut prompt = String::new();

    // The upload artifact is created here, before the pipeline runs, and is
    // owned by this request until the cleanup step deletes it.
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => match field.name().map(str::to_string).as_deref() {
                Some("image") => {
                    let bytes = match field.bytes().await {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            warn!(error = %err, "failed to read image field");
                            return abort(artifact.take()).await;
                        }
                    };
                    // An empty file field counts as no upload.
                    if bytes.is_empty() {
                        continue;
                    }
                    match UploadArtifact::persist(&app.config.upload_dir, &bytes).await {
                        // Last image field wins; an earlier upload is
                        // deleted immediately so nothing leaks.
                        Ok(persisted) => {
                            if let Some(previous) = artifact.replace(persisted) {
                                previous.cleanup().await;
                            }
                        }
                        Err(err) => {
                            error!(error = %err, "failed to persist upload artifact");
                            if let Some(previous) = artifact.take() {
                                previous.cleanup().await;
                            }
                            return error::internal_error(error::VISION_PIPELINE_FAILED);
                        }
                    }
                }
                Some("prompt") => {
                    prompt = field.text().await.unwrap_or_default();
                }
                _ => {}
            },
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "malformed multipart body");
                return abort(artifact.take()).await;
            }
        }
    }

    let mut ctx = VisionContext {
        app,
        state: RequestState::Validate,
        artifact,
        prompt,
        encoded: None,
        outcome: None,
    };
    drive(&mut ctx).await
}

/// Abandon extraction: delete any already-persisted artifact and pick the
/// response. Before an image is persisted the request is simply missing its
/// upload (400); once one is on disk, "no image uploaded" would be wrong,
/// so a broken body maps to the generic pipeline failure instead.
async fn abort(artifact: Option<UploadArtifact>) -> Response {
    match artifact {
        Some(persisted) => {
            persisted.cleanup().await;
            error::internal_error(error::VISION_PIPELINE_FAILED)
        }
        None => error::bad_request(error::NO_IMAGE_UPLOADED),
    }
}

/// Execute the state machine to completion and return the final `Response`.
async fn drive(ctx: &mut VisionContext) -> Response {
    loop {
        let result = match ctx.state {
            RequestState::Validate => steps::validate(ctx),
            RequestState::Encode => steps::encode(ctx).await,
            RequestState::Dispatch => steps::dispatch(ctx).await,
            RequestState::Cleanup => steps::cleanup(ctx).await,
            RequestState::Respond => steps::respond(ctx),
        };

        match result {
            StepResult::Continue => continue,
            StepResult::Response(response) => return response,
        }
    }
}
