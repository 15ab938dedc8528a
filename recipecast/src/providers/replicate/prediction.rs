//! Replicate prediction wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;

/// Lifecycle status of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    /// Queued, waiting for a worker.
    Starting,
    /// Running.
    Processing,
    /// Finished with output.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Canceled before finishing.
    Canceled,
}

impl PredictionStatus {
    /// Whether the prediction will not change anymore.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    /// The status as Replicate spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

/// Body for creating a prediction.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreatePrediction<'a> {
    pub version: &'a str,
    pub input: PredictionInput<'a>,
}

/// Model input for an image prediction.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PredictionInput<'a> {
    pub prompt: &'a str,
}

/// Links returned with a prediction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionUrls {
    /// URL to poll for the prediction state.
    pub get: Option<String>,
}

/// A prediction as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Prediction ID.
    pub id: String,
    /// Current status.
    pub status: PredictionStatus,
    /// Model output; for image models a list of URLs.
    #[serde(default)]
    pub output: Option<Value>,
    /// Error message when the prediction failed.
    #[serde(default)]
    pub error: Option<Value>,
    /// Related links.
    #[serde(default)]
    pub urls: PredictionUrls,
}

impl Prediction {
    /// Extract image URLs from a succeeded prediction's output.
    ///
    /// Accepts both a list of URLs and a single URL string.
    pub fn image_urls(&self) -> Result<Vec<String>, ProviderError> {
        match &self.output {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        ProviderError::response_format("image URL string", item.to_string())
                    })
                })
                .collect(),
            Some(Value::String(url)) => Ok(vec![url.clone()]),
            Some(other) => Err(ProviderError::response_format(
                "list of image URLs",
                other.to_string(),
            )),
            None => Err(ProviderError::response_format("prediction output", "null")),
        }
    }

    /// Human-readable error message of a failed prediction.
    #[must_use]
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => format!("prediction {} {}", self.id, self.status.as_str()),
            Some(other) => other.to_string(),
        }
    }
}

/// Split `owner/name:version` into its version hash; a bare hash is returned as is.
#[must_use]
pub(crate) fn model_version(model: &str) -> &str {
    model.rsplit_once(':').map_or(model, |(_, version)| version)
}
