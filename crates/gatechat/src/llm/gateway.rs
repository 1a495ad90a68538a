//! Model-serving gateway provider.
//!
//! Speaks the OpenAI-compatible `chat/completions` format, authenticated with
//! a gateway API key in a custom header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};

use super::error::LLMError;
use super::provider::LLMProvider;
use super::types::{ChatRequest, ChatResponse, GenerationParams, Message};
use crate::config::GatewayConfig;

/// Provider for the model-serving gateway.
pub struct GatewayClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: Option<String>,
    params: GenerationParams,
}

impl GatewayClient {
    pub const API_KEY_HEADER: &'static str = "X-GATEWAY-APIKEY";

    #[must_use]
    pub fn new(client: Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model: None,
            params: GenerationParams::default(),
        }
    }

    /// Build a client from configuration, including the HTTP client itself.
    pub fn from_config(
        config: &GatewayConfig,
        params: GenerationParams,
        api_key: String,
    ) -> Result<Self, LLMError> {
        let client = build_http_client(
            Duration::from_secs(config.timeout_seconds),
            config.insecure_skip_tls_verify,
        )?;

        Ok(Self::new(client, config.endpoint.clone(), api_key)
            .with_model(config.model.clone())
            .with_params(params))
    }

    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Value of the API key header. The gateway expects no space after `Bearer`.
    fn auth_header(&self) -> String {
        format!("Bearer{}", self.api_key)
    }
}

/// Build the shared HTTP client with a request timeout.
///
/// Certificate verification stays on unless `insecure_skip_tls_verify` is set.
pub fn build_http_client(
    timeout: Duration,
    insecure_skip_tls_verify: bool,
) -> Result<Client, reqwest::Error> {
    if insecure_skip_tls_verify {
        warn!("TLS certificate verification is disabled for the gateway client");
    }

    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(insecure_skip_tls_verify)
        .build()
}

#[async_trait]
impl LLMProvider for GatewayClient {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, LLMError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            params: self.params.clone(),
        };

        debug!(
            endpoint = %self.endpoint,
            messages = request.messages.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header(Self::API_KEY_HEADER, self.auth_header())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Gateway request failed");
            return Err(LLMError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| LLMError::MalformedResponse(format!("invalid json: {e}")))?;

        if let Some(usage) = parsed.usage {
            debug!(
                id = parsed.id.as_deref().unwrap_or_default(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Chat request completed"
            );
        }

        parsed.into_content().ok_or_else(|| {
            LLMError::MalformedResponse("missing choices[0].message.content".to_string())
        })
    }
}
