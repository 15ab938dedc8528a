//! Replicate API client and ImageGenerationProvider implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};
use crate::image::{ImageGenerationProvider, ImageRequest, ImageResponse};

use super::config::ReplicateConfig;
use super::prediction::{
    CreatePrediction, Prediction, PredictionInput, PredictionStatus, model_version,
};

/// Replicate error body.
#[derive(Debug, Deserialize)]
struct ReplicateErrorResponse {
    #[serde(default)]
    title: Option<String>,
    detail: String,
}

/// Replicate API client.
#[derive(Debug, Clone)]
pub struct Replicate {
    pub(crate) config: Arc<ReplicateConfig>,
    pub(crate) client: Client,
}

impl Replicate {
    /// Provider name used in logs and errors.
    pub const PROVIDER: &'static str = "replicate";

    /// Create a new client. An empty token is accepted; requests then fail
    /// with an authentication error.
    pub fn new(config: ReplicateConfig) -> Result<Self> {
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
        Self::new(ReplicateConfig::from_env())
    }

    /// Get the default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether an API token is configured.
    #[must_use]
    pub fn has_api_token(&self) -> bool {
        !self.config.api_token.is_empty()
    }

    fn predictions_url(&self) -> String {
        format!("{}/predictions", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        if !self.has_api_token() {
            return Err(ProviderError::missing_credential(
                Self::PROVIDER,
                ReplicateConfig::API_TOKEN_ENV,
            )
            .into());
        }

        Ok(builder.header("Authorization", format!("Bearer {}", self.config.api_token)))
    }

    /// Parse an error response from Replicate.
    pub(crate) fn parse_error(status: u16, body: &str) -> ProviderError {
        let Ok(error) = serde_json::from_str::<ReplicateErrorResponse>(body) else {
            return ProviderError::http_status(status, body).for_provider(Self::PROVIDER);
        };

        match status {
            401 | 403 => ProviderError::auth(Self::PROVIDER, error.detail),
            429 => ProviderError::rate_limited(Self::PROVIDER),
            402 | 422 => ProviderError::invalid_request(Self::PROVIDER, error.detail),
            _ => match error.title {
                Some(title) => ProviderError::provider_code(Self::PROVIDER, title, error.detail),
                None => ProviderError::provider(Self::PROVIDER, error.detail),
            },
        }
    }

    async fn read_prediction(response: Response) -> Result<Prediction> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?;
        serde_json::from_str::<Prediction>(&text).map_err(|e| {
            ProviderError::response_format(
                "valid prediction",
                format!("parse error: {e}, response: {text}"),
            )
            .for_provider(Self::PROVIDER)
            .into()
        })
    }

    /// Create a prediction for a model version and prompt.
    pub async fn create_prediction(&self, model: &str, prompt: &str) -> Result<Prediction> {
        let body = CreatePrediction {
            version: model_version(model),
            input: PredictionInput { prompt },
        };
        debug!(version = body.version, "creating prediction");

        let response = self
            .authorize(self.client.post(self.predictions_url()))?
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?;

        Self::read_prediction(response).await
    }

    /// Fetch the current state of a prediction.
    pub async fn get_prediction(&self, prediction: &Prediction) -> Result<Prediction> {
        let url = prediction
            .urls
            .get
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.predictions_url(), prediction.id));

        let response = self
            .authorize(self.client.get(url))?
            .send()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?;

        Self::read_prediction(response).await
    }

    /// Poll a prediction until it reaches a terminal status.
    pub async fn wait(&self, mut prediction: Prediction) -> Result<Prediction> {
        let mut polls = 0;
        while !prediction.status.is_terminal() {
            if polls >= self.config.max_polls {
                warn!(id = %prediction.id, polls, "prediction did not finish in time");
                return Err(ProviderError::timeout(
                    Self::PROVIDER,
                    format!(
                        "prediction {} still {} after {polls} polls",
                        prediction.id,
                        prediction.status.as_str()
                    ),
                )
                .into());
            }

            tokio::time::sleep(self.config.poll_interval).await;
            prediction = self.get_prediction(&prediction).await?;
            polls += 1;
            debug!(id = %prediction.id, status = prediction.status.as_str(), "polled prediction");
        }

        Ok(prediction)
    }
}

#[async_trait]
impl ImageGenerationProvider for Replicate {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageResponse> {
        let model = if request.model.is_empty() {
            self.model()
        } else {
            request.model.as_str()
        };

        let created = self.create_prediction(model, &request.prompt).await?;
        let prediction = self.wait(created).await?;

        match prediction.status {
            PredictionStatus::Succeeded => {
                let urls = prediction
                    .image_urls()
                    .map_err(|e| e.for_provider(Self::PROVIDER))?;
                Ok(ImageResponse::new(urls))
            }
            status => Err(ProviderError::prediction(
                Self::PROVIDER,
                status.as_str(),
                prediction.error_message(),
            )
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        Self::PROVIDER
    }
}
