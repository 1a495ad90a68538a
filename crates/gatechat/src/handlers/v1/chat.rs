//! Chat relay handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::llm::Message;
use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct ChatBody {
    messages: Vec<Message>,
}

#[derive(Serialize)]
pub struct ChatReply {
    content: String,
}

/// POST /api/v1/chat
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatBody>) -> Response {
    if req.messages.is_empty() {
        return response::bad_request("messages must not be empty").into_response();
    }

    match state.provider.chat(req.messages).await {
        Ok(content) => (StatusCode::OK, Json(ChatReply { content })).into_response(),
        Err(e) => response::upstream_error(&e).into_response(),
    }
}
