//! Replicate client configuration.

use std::time::Duration;

/// Configuration for the Replicate client.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// API token. Empty when the token was never configured.
    pub api_token: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Default model, either a bare version hash or `owner/name:version`.
    pub model: String,
    /// Delay between prediction status polls.
    pub poll_interval: Duration,
    /// Polls before giving up on a prediction.
    pub max_polls: u32,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ReplicateConfig {
    /// Default Replicate API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.replicate.com/v1";
    /// Stable Diffusion model version.
    pub const DEFAULT_MODEL: &'static str = "stability-ai/stable-diffusion:db21e45d3f7023abc2a46ee38a23973f6dce16bb082a930b0c49861f96d1e5bf";
    /// Environment variable holding the API token.
    pub const API_TOKEN_ENV: &'static str = "REPLICATE_API_TOKEN";
    /// Default delay between polls.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
    /// Default poll budget.
    pub const DEFAULT_MAX_POLLS: u32 = 120;

    /// Creates a new configuration with the given API token.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Creates configuration from `REPLICATE_API_TOKEN`, leaving the token empty when unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(Self::API_TOKEN_ENV).unwrap_or_default())
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the polling cadence.
    #[must_use]
    pub const fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            max_polls: Self::DEFAULT_MAX_POLLS,
            timeout_secs: Some(120),
        }
    }
}
