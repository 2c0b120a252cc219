//! OpenAI-compatible chat completion protocol types.
//!
//! Covers the subset of the Chat Completions API the gateway speaks:
//! role-tagged messages whose content is either plain text or a list of
//! multimodal parts (text + image references), plus the non-streaming
//! response shape.

pub mod chat;

pub use chat::{
    AssistantMessage, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ContentPart, ImageUrl, MessageContent, Role, Usage,
};
