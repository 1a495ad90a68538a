//! XiaoliuRen advice handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::debug;

use crate::advice::{AdviceRequest, build_messages};
use crate::response;
use crate::server::AppState;

#[derive(Serialize)]
pub struct AdviceReply {
    advice: String,
}

/// POST /api/v1/advice
pub async fn advice(State(state): State<AppState>, Json(req): Json<AdviceRequest>) -> Response {
    if !req.is_complete() {
        return response::bad_request("question and palace are required").into_response();
    }

    debug!(palace = %req.palace, "Building advice prompt");
    let messages = build_messages(&req);

    let advice = match state.provider.chat(messages).await {
        Ok(content) => content,
        Err(e) => return response::upstream_error(&e).into_response(),
    };

    if advice.is_empty() {
        return response::bad_gateway("no content in upstream response", None).into_response();
    }

    (StatusCode::OK, Json(AdviceReply { advice })).into_response()
}
