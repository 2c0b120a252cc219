//! HTTP request routing for the two inference pipelines.

pub mod chat;
pub mod error;
pub mod vision;
