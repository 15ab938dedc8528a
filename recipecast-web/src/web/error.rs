//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recipecast::ValidationError;
use serde_json::json;

/// Errors returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The submitted fields did not validate.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    Body(String),

    /// A backend call failed.
    #[error(transparent)]
    Pipeline(#[from] recipecast::Error),

    /// The page could not be rendered.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl WebError {
    /// Status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Body(_)
            | Self::Pipeline(recipecast::Error::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Pipeline(_) => StatusCode::BAD_GATEWAY,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Pipeline(recipecast::Error::Validation(_)) => "validation",
            Self::Body(_) => "body",
            Self::Pipeline(err) => err.as_provider().map_or("pipeline", |e| e.kind.as_str()),
            Self::Render(_) => "render",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipecast::ProviderError;

    #[test]
    fn validation_is_unprocessable() {
        let err = WebError::from(ValidationError::EmptyFood);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn backend_failure_is_bad_gateway() {
        let err = WebError::from(recipecast::Error::from(ProviderError::rate_limited("openai")));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind(), "rate_limited");
    }
}
