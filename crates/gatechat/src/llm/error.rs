//! LLM error types.

use thiserror::Error;

/// Errors that can occur when calling the model gateway.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Transport failure (DNS, connection refused, timeout)
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gateway answered with a status other than 200
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Gateway answered 200 but the body has no `choices[0].message.content`
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
