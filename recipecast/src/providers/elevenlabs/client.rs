//! ElevenLabs API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ProviderError, Result};

use super::config::ElevenLabsConfig;

/// ElevenLabs error body: `detail` is either a string or `{status, message}`.
#[derive(Debug, Deserialize)]
struct ElevenLabsErrorResponse {
    detail: Value,
}

/// ElevenLabs API client.
#[derive(Debug, Clone)]
pub struct ElevenLabs {
    pub(crate) config: Arc<ElevenLabsConfig>,
    pub(crate) client: Client,
}

impl ElevenLabs {
    /// Provider name used in logs and errors.
    pub const PROVIDER: &'static str = "elevenlabs";

    /// Create a new client. An empty API key is accepted; requests then fail
    /// with an authentication error.
    pub fn new(config: ElevenLabsConfig) -> Result<Self> {
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
        Self::new(ElevenLabsConfig::from_env())
    }

    /// Get the speech model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Build the text-to-speech URL for a voice.
    pub(crate) fn speech_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{voice_id}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build a JSON POST request with the `xi-api-key` header.
    pub(crate) fn build_request(&self, url: &str) -> Result<reqwest::RequestBuilder> {
        if !self.has_api_key() {
            return Err(ProviderError::missing_credential(
                Self::PROVIDER,
                ElevenLabsConfig::API_KEY_ENV,
            )
            .into());
        }

        Ok(self
            .client
            .post(url)
            .header("xi-api-key", &self.config.api_key)
            .header("Content-Type", "application/json"))
    }

    /// Parse an error response from ElevenLabs.
    pub(crate) fn parse_error(status: u16, body: &str) -> ProviderError {
        let detail = serde_json::from_str::<ElevenLabsErrorResponse>(body)
            .ok()
            .map(|resp| match resp.detail {
                Value::String(message) => (None, message),
                Value::Object(map) => (
                    map.get("status").and_then(Value::as_str).map(str::to_owned),
                    map.get("message")
                        .and_then(Value::as_str)
                        .map_or_else(|| Value::Object(map.clone()).to_string(), str::to_owned),
                ),
                other => (None, other.to_string()),
            });

        let Some((code, message)) = detail else {
            return ProviderError::http_status(status, body).for_provider(Self::PROVIDER);
        };

        match (status, code) {
            (401 | 403, _) => ProviderError::auth(Self::PROVIDER, message),
            (429, _) => ProviderError::rate_limited(Self::PROVIDER),
            (_, Some(code)) => ProviderError::provider_code(Self::PROVIDER, code, message),
            (_, None) => ProviderError::provider(Self::PROVIDER, message),
        }
    }
}
