//! Configuration schema definitions.
//!
//! Every section has defaults, so an empty file (or no file) is a valid
//! configuration. Credentials are optional here; a missing credential only
//! fails the backend call that needs it.

use std::net::SocketAddr;
use std::time::Duration;

use recipecast::{
    ExecutionMode, PipelineSettings,
    providers::{ElevenLabsConfig, OpenAIConfig, ReplicateConfig},
};
use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Text generation backend.
    #[serde(default)]
    pub openai: OpenAISection,

    /// Speech synthesis backend.
    #[serde(default)]
    pub elevenlabs: ElevenLabsSection,

    /// Image generation backend.
    #[serde(default)]
    pub replicate: ReplicateSection,

    /// Pipeline scheduling.
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

const fn default_timeout() -> u64 {
    120
}

/// OpenAI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAISection {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Organization ID sent as `OpenAI-Organization`.
    #[serde(default)]
    pub organization: Option<String>,
    /// Base URL override.
    #[serde(default = "default_openai_url")]
    pub base_url: String,
    /// Chat model.
    #[serde(default = "default_openai_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Token cap for the recipe; 0 leaves it to the model.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_openai_url() -> String {
    OpenAIConfig::DEFAULT_BASE_URL.to_owned()
}

fn default_openai_model() -> String {
    OpenAIConfig::DEFAULT_MODEL.to_owned()
}

const fn default_temperature() -> f32 {
    PipelineSettings::DEFAULT_TEMPERATURE
}

const fn default_max_tokens() -> u32 {
    PipelineSettings::DEFAULT_MAX_TOKENS
}

impl Default for OpenAISection {
    fn default() -> Self {
        Self {
            api_key: None,
            organization: None,
            base_url: default_openai_url(),
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

/// ElevenLabs settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevenLabsSection {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL override.
    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,
    /// Speech model.
    #[serde(default = "default_elevenlabs_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    ElevenLabsConfig::DEFAULT_BASE_URL.to_owned()
}

fn default_elevenlabs_model() -> String {
    ElevenLabsConfig::DEFAULT_MODEL.to_owned()
}

impl Default for ElevenLabsSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_url(),
            model: default_elevenlabs_model(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Replicate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicateSection {
    /// API token.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Base URL override.
    #[serde(default = "default_replicate_url")]
    pub base_url: String,
    /// Model version, either `owner/name:hash` or a bare hash.
    #[serde(default = "default_model_version")]
    pub model_version: String,
    /// Delay between prediction polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Polls before giving up on a prediction.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_replicate_url() -> String {
    ReplicateConfig::DEFAULT_BASE_URL.to_owned()
}

fn default_model_version() -> String {
    ReplicateConfig::DEFAULT_MODEL.to_owned()
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_max_polls() -> u32 {
    ReplicateConfig::DEFAULT_MAX_POLLS
}

impl Default for ReplicateSection {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: default_replicate_url(),
            model_version: default_model_version(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Pipeline scheduling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSection {
    /// `sequential` or `concurrent`.
    #[serde(default)]
    pub mode: ExecutionMode,
}

impl AppConfig {
    /// Validate the configuration and return any issues found.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let credentials = [
            ("openai.api_key", self.openai.api_key.as_ref(), OpenAIConfig::API_KEY_ENV),
            (
                "elevenlabs.api_key",
                self.elevenlabs.api_key.as_ref(),
                ElevenLabsConfig::API_KEY_ENV,
            ),
            (
                "replicate.api_token",
                self.replicate.api_token.as_ref(),
                ReplicateConfig::API_TOKEN_ENV,
            ),
        ];
        for (path, value, env) in credentials {
            if value.is_none_or(|v| v.is_empty()) {
                issues.push(ConfigIssue::warning(
                    path,
                    format!("not set; requests will fail until {env} is provided"),
                ));
            }
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            issues.push(ConfigIssue::error(
                "openai.temperature",
                "Temperature must be between 0.0 and 2.0",
            ));
        }

        if self.replicate.max_polls == 0 {
            issues.push(ConfigIssue::error(
                "replicate.max_polls",
                "Max polls must be at least 1",
            ));
        }

        if self.replicate.poll_interval_ms == 0 {
            issues.push(ConfigIssue::warning(
                "replicate.poll_interval_ms",
                "Poll interval is 0, predictions will be polled without delay",
            ));
        }

        issues
    }

    /// Check if the configuration is valid (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate()
            .iter()
            .all(|issue| issue.level != IssueLevel::Error)
    }

    /// Merge process environment variables into the configuration.
    pub fn with_env(self) -> ConfigResult<Self> {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Merge variables from `lookup` into the configuration.
    ///
    /// Set variables override values from the file; empty ones are ignored.
    pub fn with_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(listen) = var("RECIPECAST_LISTEN") {
            self.server.listen = listen.parse().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "RECIPECAST_LISTEN: '{listen}' is not an address"
                ))
            })?;
        }

        if let Some(key) = var(OpenAIConfig::API_KEY_ENV) {
            self.openai.api_key = Some(key);
        }
        if let Some(org) = var(OpenAIConfig::ORGANIZATION_ENV) {
            self.openai.organization = Some(org);
        }
        if let Some(url) = var("OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.openai.model = model;
        }

        if let Some(key) = var(ElevenLabsConfig::API_KEY_ENV) {
            self.elevenlabs.api_key = Some(key);
        }

        if let Some(token) = var(ReplicateConfig::API_TOKEN_ENV) {
            self.replicate.api_token = Some(token);
        }

        Ok(self)
    }

    /// OpenAI client configuration.
    #[must_use]
    pub fn openai_config(&self) -> OpenAIConfig {
        let config = OpenAIConfig::new(self.openai.api_key.clone().unwrap_or_default())
            .with_base_url(&self.openai.base_url)
            .with_model(&self.openai.model)
            .with_timeout(self.openai.timeout_secs);

        match &self.openai.organization {
            Some(org) => config.with_organization(org),
            None => config,
        }
    }

    /// ElevenLabs client configuration.
    #[must_use]
    pub fn elevenlabs_config(&self) -> ElevenLabsConfig {
        ElevenLabsConfig::new(self.elevenlabs.api_key.clone().unwrap_or_default())
            .with_base_url(&self.elevenlabs.base_url)
            .with_model(&self.elevenlabs.model)
            .with_timeout(self.elevenlabs.timeout_secs)
    }

    /// Replicate client configuration.
    #[must_use]
    pub fn replicate_config(&self) -> ReplicateConfig {
        ReplicateConfig::new(self.replicate.api_token.clone().unwrap_or_default())
            .with_base_url(&self.replicate.base_url)
            .with_model(&self.replicate.model_version)
            .with_polling(
                Duration::from_millis(self.replicate.poll_interval_ms),
                self.replicate.max_polls,
            )
            .with_timeout(self.replicate.timeout_secs)
    }

    /// Settings applied to every pipeline run.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            chat_model: self.openai.model.clone(),
            temperature: self.openai.temperature,
            max_tokens: (self.openai.max_tokens > 0).then_some(self.openai.max_tokens),
            speech_model: self.elevenlabs.model.clone(),
            image_model: self.replicate.model_version.clone(),
            mode: self.pipeline.mode,
        }
    }
}

/// Configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    /// Issue severity level.
    pub level: IssueLevel,
    /// Configuration path (e.g., "replicate.max_polls").
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigIssue {
    /// Create an error-level issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            IssueLevel::Error => "ERROR",
            IssueLevel::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", prefix, self.path, self.message)
    }
}

/// Severity level for configuration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    /// Error that prevents the server from working correctly.
    Error,
    /// Warning about potential issues.
    Warning,
}
