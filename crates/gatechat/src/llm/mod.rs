//! LLM gateway client for chat completions.

mod error;
mod gateway;
mod provider;
mod types;

pub use error::LLMError;
pub use gateway::{GatewayClient, build_http_client};
pub use provider::{FAILURE_SENTINEL, LLMProvider};
pub use types::{
    ChatRequest, ChatResponse, Choice, GenerationParams, Message, ResponseMessage, Role, Usage,
};
