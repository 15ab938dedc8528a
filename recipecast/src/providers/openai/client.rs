//! OpenAI API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{ProviderError, Result};

use super::config::OpenAIConfig;
use super::types::{OpenAIChatRequest, OpenAIErrorResponse, OpenAIMessage};

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub(crate) config: Arc<OpenAIConfig>,
    pub(crate) client: Client,
}

impl OpenAI {
    /// Provider name used in logs and errors.
    pub const PROVIDER: &'static str = "openai";

    /// Create a new OpenAI client with the given configuration.
    ///
    /// An empty API key is accepted here; requests then fail with an
    /// authentication error.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| ProviderError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build a JSON POST request with authentication headers.
    pub(crate) fn build_request(&self, url: &str) -> Result<reqwest::RequestBuilder> {
        if !self.has_api_key() {
            return Err(
                ProviderError::missing_credential(Self::PROVIDER, OpenAIConfig::API_KEY_ENV).into(),
            );
        }

        let mut req = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        if let Some(org) = &self.config.organization {
            req = req.header("OpenAI-Organization", org);
        }

        Ok(req)
    }

    /// Build the request body.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> OpenAIChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.as_str().to_owned(),
                content: msg.content.clone().unwrap_or_default(),
            })
            .collect();

        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };

        OpenAIChatRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Parse an error response from OpenAI.
    pub(crate) fn parse_error(status: u16, body: &str) -> ProviderError {
        if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let error = error_response.error;

            return match status {
                401 | 403 => ProviderError::auth(Self::PROVIDER, error.message),
                429 => ProviderError::rate_limited(Self::PROVIDER),
                _ => match error.code.or(error.error_type) {
                    Some(code) => ProviderError::provider_code(Self::PROVIDER, code, error.message),
                    None => ProviderError::provider(Self::PROVIDER, error.message),
                },
            };
        }

        ProviderError::http_status(status, body).for_provider(Self::PROVIDER)
    }
}
