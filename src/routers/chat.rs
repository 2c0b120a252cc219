//! Text pipeline: `POST /api/chat/message`.
//!
//! Single-shot flow: Received → Validated → Dispatched → Responded.
//! No conversation state is kept between calls.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::error;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatMessageBody {
    /// Absent, null and empty are all treated as missing.
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    reply: String,
    timestamp: DateTime<Utc>,
}

pub async fn handle_message(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageBody>,
) -> Response {
    // No trimming, no length cap: only presence is validated.
    let Some(message) = body.message.filter(|message| !message.is_empty()) else {
        return error::bad_request(error::MISSING_MESSAGE);
    };

    match state.backend.complete(&message).await {
        Ok(result) => Json(ChatReply {
            reply: result.text,
            timestamp: Utc::now(),
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "chat completion failed");
            error::internal_error(error::CHAT_PIPELINE_FAILED)
        }
    }
}
