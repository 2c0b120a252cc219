//! chat-vision-gateway — forwards chat text and image uploads to
//! OpenAI-compatible inference endpoints and normalizes the replies.
//!
//! Two pipelines share one normalized response/error contract:
//! - **text**: `POST /api/chat/message` → text-completion model
//! - **vision**: `POST /api/vision/analyze` → multimodal model, with
//!   upload transcoding and artifact cleanup on the way

pub mod clients;
pub mod config;
pub mod media;
pub mod routers;
pub mod server;
