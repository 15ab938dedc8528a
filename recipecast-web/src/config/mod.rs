//! Configuration loading for the recipecast server.
//!
//! Sources, lowest to highest precedence:
//! 1. Default values
//! 2. Config file (`--config` / `RECIPECAST_CONFIG`)
//! 3. `.env` file, loaded into the process environment at start-up
//! 4. Environment variables
//! 5. Command-line flags, applied by the binary

mod schema;

pub use schema::{
    AppConfig, ConfigIssue, ElevenLabsSection, IssueLevel, OpenAISection, PipelineSection,
    ReplicateSection, ServerConfig,
};

use std::path::Path;
use tracing::{debug, info};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// Invalid value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load configuration from a specific path, without environment overrides.
///
/// A missing file yields the defaults.
pub async fn load_config_from(path: &Path) -> ConfigResult<AppConfig> {
    if !path.exists() {
        info!(path = %path.display(), "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Load the file (if any) and merge the process environment over it.
pub async fn load_config(path: Option<&Path>) -> ConfigResult<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path).await?,
        None => AppConfig::default(),
    };

    config.with_env()
}
