//! Step implementations for the vision state machine.
//!
//! Each step reads/writes `VisionContext` and updates `ctx.state` to drive
//! the machine forward. Steps never short-circuit past Cleanup: failures in
//! encode or dispatch are recorded in `ctx.outcome` and the artifact is
//! still deleted before the response is built.

use axum::{response::IntoResponse, Json};
use chrono::Utc;
use tracing::error;

use super::{
    state::{RequestState, StepResult},
    PipelineFailure, VisionContext, VisionReply, DEFAULT_PROMPT,
};
use crate::{media, routers::error};

/// Validate: an image must have been attached; default the prompt if blank.
pub(crate) fn validate(ctx: &mut VisionContext) -> StepResult {
    if ctx.artifact.is_none() {
        return StepResult::Response(error::bad_request(error::NO_IMAGE_UPLOADED));
    }

    if ctx.prompt.trim().is_empty() {
        ctx.prompt = DEFAULT_PROMPT.to_string();
    }

    ctx.state = RequestState::Encode;
    StepResult::Continue
}

/// Encode: read the persisted upload and base64-encode the full contents.
pub(crate) async fn encode(ctx: &mut VisionContext) -> StepResult {
    let Some(artifact) = ctx.artifact.as_ref() else {
        // Unreachable after validate; treated as an encode failure so the
        // machine still passes through Cleanup.
        ctx.outcome = Some(Err(PipelineFailure::Encode));
        ctx.state = RequestState::Cleanup;
        return StepResult::Continue;
    };

    match media::encode_file(artifact.path()).await {
        Ok(encoded) => {
            ctx.encoded = Some(encoded);
            ctx.state = RequestState::Dispatch;
        }
        Err(err) => {
            error!(error = %err, "failed to read upload for encoding");
            ctx.outcome = Some(Err(PipelineFailure::Encode));
            ctx.state = RequestState::Cleanup;
        }
    }
    StepResult::Continue
}

/// Dispatch: invoke the vision model with the encoded image and prompt.
pub(crate) async fn dispatch(ctx: &mut VisionContext) -> StepResult {
    let encoded = ctx.encoded.take().unwrap_or_default();

    match ctx.app.backend.analyze(&encoded, &ctx.prompt).await {
        Ok(result) => ctx.outcome = Some(Ok(result)),
        Err(err) => {
            error!(error = %err, "vision inference failed");
            ctx.outcome = Some(Err(PipelineFailure::Inference));
        }
    }

    ctx.state = RequestState::Cleanup;
    StepResult::Continue
}

/// Cleanup: delete the upload artifact, whatever the dispatch outcome was.
pub(crate) async fn cleanup(ctx: &mut VisionContext) -> StepResult {
    if let Some(artifact) = ctx.artifact.take() {
        artifact.cleanup().await;
    }
    ctx.state = RequestState::Respond;
    StepResult::Continue
}

/// Respond: build the final HTTP response from the recorded outcome.
pub(crate) fn respond(ctx: &mut VisionContext) -> StepResult {
    let response = match ctx.outcome.take() {
        Some(Ok(result)) => Json(VisionReply {
            analysis: result.text,
            timestamp: Utc::now(),
        })
        .into_response(),
        Some(Err(_)) | None => error::internal_error(error::VISION_PIPELINE_FAILED),
    };
    StepResult::Response(response)
}
