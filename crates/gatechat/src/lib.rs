//! Gatechat - chat completion client and relay for a model-serving gateway.

pub mod advice;
pub mod config;
pub mod handlers;
pub mod llm;
pub mod response;
pub mod server;
