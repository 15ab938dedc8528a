//! ElevenLabs client configuration.

/// Configuration for the ElevenLabs client.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key sent as `xi-api-key`. Empty when the key was never configured.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Speech model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ElevenLabsConfig {
    /// Default ElevenLabs API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.elevenlabs.io/v1";
    /// Default speech model.
    pub const DEFAULT_MODEL: &'static str = "eleven_monolingual_v1";
    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &'static str = "ELEVEN_API_KEY";

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Creates configuration from `ELEVEN_API_KEY`, leaving the key empty when unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(Self::API_KEY_ENV).unwrap_or_default())
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the speech model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout_secs: Some(120),
        }
    }
}
