//! JSON error responses for HTTP handlers.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::llm::LLMError;

/// Error body returned by every failing handler.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    error_response(StatusCode::BAD_REQUEST, message.into(), None)
}

pub fn bad_gateway(
    message: impl Into<String>,
    detail: Option<String>,
) -> (StatusCode, Json<ErrorBody>) {
    error_response(StatusCode::BAD_GATEWAY, message.into(), detail)
}

/// Map a gateway failure onto a 502, keeping the upstream body as `detail`.
pub fn upstream_error(err: &LLMError) -> (StatusCode, Json<ErrorBody>) {
    match err {
        LLMError::Api { status, message } => {
            bad_gateway(format!("upstream error {status}"), Some(message.clone()))
        }
        LLMError::MalformedResponse(reason) => {
            bad_gateway("invalid response from upstream", Some(reason.clone()))
        }
        LLMError::Request(e) => bad_gateway("upstream request failed", Some(e.to_string())),
    }
}

fn error_response(
    status: StatusCode,
    error: String,
    detail: Option<String>,
) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody { error, detail }))
}
