//! Unified error types for recipecast.
//!
//! This module provides the error hierarchy covering:
//! - Backend provider errors (authentication, rate limiting, failed predictions, etc.)
//! - Recipe request validation errors
//! - Prompt template rendering errors

use std::fmt;

use crate::recipe::ValidationError;

/// Result type alias for recipecast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for recipecast.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Backend provider error.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Invalid recipe request.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Prompt template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    /// Returns the provider error if this error came from a backend call.
    #[must_use]
    pub const fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for backend provider operations.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ProviderError {
    /// The error kind.
    pub kind: ProviderErrorKind,
    /// The provider name (e.g., "openai", "elevenlabs", "replicate").
    pub provider: Option<String>,
    /// Additional error message.
    pub message: String,
    /// Optional error code from the provider.
    pub code: Option<String>,
}

/// Categories of provider errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderErrorKind {
    /// Authentication or authorization failure, including a missing credential.
    Auth,
    /// Rate limit or quota exceeded.
    RateLimited,
    /// Invalid request parameters.
    InvalidRequest,
    /// Response format error (including empty responses).
    ResponseFormat,
    /// Network or connection error.
    Network,
    /// HTTP status error.
    HttpStatus,
    /// Provider-specific error.
    Provider,
    /// A remote prediction finished in a failed or canceled state.
    Prediction,
    /// Gave up waiting for a remote job.
    Timeout,
    /// Internal error.
    Internal,
}

impl ProviderErrorKind {
    /// Stable snake_case name, used in JSON error bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::RateLimited => "rate_limited",
            Self::InvalidRequest => "invalid_request",
            Self::ResponseFormat => "response_format",
            Self::Network => "network",
            Self::HttpStatus => "http_status",
            Self::Provider => "provider",
            Self::Prediction => "prediction",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

impl ProviderError {
    const fn with_kind(kind: ProviderErrorKind, provider: Option<String>, message: String) -> Self {
        Self {
            kind,
            provider,
            message,
            code: None,
        }
    }

    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(
            ProviderErrorKind::Auth,
            Some(provider.into()),
            message.into(),
        )
    }

    /// Create an error for a credential that was never configured.
    #[must_use]
    pub fn missing_credential(provider: impl Into<String>, env_var: &str) -> Self {
        Self::auth(provider, format!("{env_var} is not set"))
    }

    /// Create a rate limit error.
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::with_kind(
            ProviderErrorKind::RateLimited,
            Some(provider.into()),
            "Rate limit exceeded. Please retry after some time.".into(),
        )
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(
            ProviderErrorKind::InvalidRequest,
            Some(provider.into()),
            message.into(),
        )
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::with_kind(
            ProviderErrorKind::ResponseFormat,
            None,
            format!("Expected {}, got {}", expected.into(), got.into()),
        )
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(ProviderErrorKind::Network, None, message.into())
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            code: Some(status.to_string()),
            ..Self::with_kind(
                ProviderErrorKind::HttpStatus,
                None,
                format!("HTTP {status}: {}", body.into()),
            )
        }
    }

    /// Create a provider-specific error.
    #[must_use]
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(
            ProviderErrorKind::Provider,
            Some(provider.into()),
            message.into(),
        )
    }

    /// Create a provider error with an error code.
    #[must_use]
    pub fn provider_code(
        provider: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::provider(provider, message)
        }
    }

    /// Create a failed prediction error.
    #[must_use]
    pub fn prediction(
        provider: impl Into<String>,
        status: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: Some(status.to_owned()),
            ..Self::with_kind(
                ProviderErrorKind::Prediction,
                Some(provider.into()),
                message.into(),
            )
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_kind(
            ProviderErrorKind::Timeout,
            Some(provider.into()),
            message.into(),
        )
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(ProviderErrorKind::Internal, None, message.into())
    }

    /// Attach the provider name if the error does not carry one yet.
    #[must_use]
    pub fn for_provider(mut self, provider: &str) -> Self {
        if self.provider.is_none() {
            self.provider = Some(provider.to_owned());
        }
        self
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{provider}] ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::with_kind(ProviderErrorKind::Timeout, None, "Request timed out".to_owned())
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod error {
        use super::*;

        #[test]
        fn from_provider_error() {
            let err: Error = ProviderError::network("timeout").into();
            assert!(matches!(err, Error::Provider(_)));
            assert!(err.as_provider().is_some());
        }

        #[test]
        fn from_validation_error() {
            let err: Error = ValidationError::EmptyFood.into();
            assert!(matches!(err, Error::Validation(_)));
            assert!(err.as_provider().is_none());
        }
    }

    mod provider_error {
        use super::*;

        #[test]
        fn missing_credential_is_auth() {
            let err = ProviderError::missing_credential("elevenlabs", "ELEVEN_API_KEY");
            assert_eq!(err.kind, ProviderErrorKind::Auth);
            assert_eq!(err.provider.as_deref(), Some("elevenlabs"));
            assert!(err.message.contains("ELEVEN_API_KEY"));
        }

        #[test]
        fn http_status_carries_code() {
            let err = ProviderError::http_status(503, "unavailable");
            assert_eq!(err.kind, ProviderErrorKind::HttpStatus);
            assert_eq!(err.code.as_deref(), Some("503"));
            assert!(err.message.contains("unavailable"));
        }

        #[test]
        fn prediction_keeps_status() {
            let err = ProviderError::prediction("replicate", "failed", "NSFW content detected");
            assert_eq!(err.kind, ProviderErrorKind::Prediction);
            assert_eq!(err.code.as_deref(), Some("failed"));
            assert_eq!(err.kind.as_str(), "prediction");
        }

        #[test]
        fn for_provider_does_not_overwrite() {
            let err = ProviderError::network("reset").for_provider("openai");
            assert_eq!(err.provider.as_deref(), Some("openai"));

            let err = ProviderError::auth("replicate", "bad token").for_provider("openai");
            assert_eq!(err.provider.as_deref(), Some("replicate"));
        }

        #[test]
        fn display_includes_provider_and_code() {
            let err = ProviderError::provider_code("openai", "insufficient_quota", "Quota hit");
            assert_eq!(err.to_string(), "[openai] Quota hit (code: insufficient_quota)");
        }

        #[test]
        fn display_without_provider() {
            let err = ProviderError::network("Connection reset");
            assert_eq!(err.to_string(), "Connection reset");
        }
    }
}
