//! Stub provider and request helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::llm::{LLMError, LLMProvider, Message};
use crate::server::{AppState, build_app};

/// Canned reply for the stub provider.
#[derive(Clone)]
pub enum Reply {
    Content(String),
    Api { status: u16, message: String },
}

pub struct StubProvider {
    reply: Reply,
    pub received: Mutex<Vec<Vec<Message>>>,
}

impl StubProvider {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            received: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LLMProvider for StubProvider {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, LLMError> {
        self.received.lock().unwrap().push(messages);
        match self.reply.clone() {
            Reply::Content(content) => Ok(content),
            Reply::Api { status, message } => Err(LLMError::Api { status, message }),
        }
    }
}

pub fn app(provider: Arc<StubProvider>) -> Router {
    build_app(AppState { provider }, 30)
}

/// POST a JSON body and return the status and parsed JSON response.
pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
