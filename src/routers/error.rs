//! Client-facing error responses.
//!
//! Inference failures collapse to one fixed message per pipeline; the
//! original error detail is preserved only in operator logs. The literal
//! message strings are part of the external contract, so they live here
//! as constants that tests can assert against.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const MISSING_MESSAGE: &str = "Message is required";
pub const NO_IMAGE_UPLOADED: &str = "No image uploaded";
pub const CHAT_PIPELINE_FAILED: &str = "Failed to process your message";
pub const VISION_PIPELINE_FAILED: &str = "Failed to analyze image";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Client input error: a required field is missing.
pub fn bad_request(message: &'static str) -> Response {
    create_error(StatusCode::BAD_REQUEST, message)
}

/// Inference (or other server-side) failure, already reduced to its
/// fixed pipeline message.
pub fn internal_error(message: &'static str) -> Response {
    create_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

pub fn create_error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}
