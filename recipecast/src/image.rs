//! Image generation types and provider trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An image generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Model identifier (for Replicate, a model version hash).
    pub model: String,
    /// Text prompt describing the image.
    pub prompt: String,
}

impl ImageRequest {
    /// Create a new image request.
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// Generated image references, in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Image URLs.
    pub urls: Vec<String>,
}

impl ImageResponse {
    /// Create a response from image URLs.
    #[must_use]
    pub const fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    /// The first image, the one that gets displayed.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    /// Consume the response, keeping only the first image.
    #[must_use]
    pub fn into_first(self) -> Option<String> {
        self.urls.into_iter().next()
    }
}

/// An image-generation backend.
#[async_trait]
pub trait ImageGenerationProvider: Send + Sync {
    /// Generate one or more images for a prompt.
    async fn generate(&self, request: &ImageRequest) -> Result<ImageResponse>;

    /// Get the name of this provider.
    fn provider_name(&self) -> &'static str;
}

/// Type alias for an Arc-wrapped [`ImageGenerationProvider`].
pub type SharedImageProvider = std::sync::Arc<dyn ImageGenerationProvider>;
