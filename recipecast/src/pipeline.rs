//! The recipe pipeline: text, then narration, then illustration.
//!
//! [`RecipePipeline::run`] performs three backend calls for one
//! [`RecipeRequest`]:
//!
//! 1. the chat provider writes a recipe from the rendered prompt,
//! 2. the speech provider narrates that recipe text with the chosen voice,
//! 3. the image provider illustrates the *original food name*.
//!
//! Any failure aborts the run and is returned as is; nothing is retried and
//! no partial result is produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use recipecast::prelude::*;
//!
//! let pipeline = RecipePipeline::new(
//!     Arc::new(OpenAI::from_env()?),
//!     Arc::new(ElevenLabs::from_env()?),
//!     Arc::new(Replicate::from_env()?),
//! );
//! let request = RecipeRequest::new("vegan chili", 500, Voice::Rachel)?;
//! let artifacts = pipeline.run(&request).await?;
//! println!("{}", artifacts.recipe);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audio::{SharedSpeechProvider, SpeechRequest, SpeechResponse};
use crate::chat::{ChatRequest, SharedChatProvider};
use crate::error::{Error, ProviderError, Result};
use crate::image::{ImageRequest, ImageResponse, SharedImageProvider};
use crate::prompt::build_prompt;
use crate::recipe::{CalorieLimit, RecipeRequest, Voice};

/// How the image call is scheduled relative to the recipe and audio calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Recipe, then audio, then images.
    #[default]
    Sequential,
    /// Images run alongside the recipe and audio chain.
    Concurrent,
}

/// Model and sampling settings applied to every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Chat model; empty uses the provider default.
    pub chat_model: String,
    /// Sampling temperature for the recipe text.
    pub temperature: f32,
    /// Token cap for the recipe text.
    pub max_tokens: Option<u32>,
    /// Speech model; empty uses the provider default.
    pub speech_model: String,
    /// Image model; empty uses the provider default.
    pub image_model: String,
    /// Scheduling of the image call.
    pub mode: ExecutionMode,
}

impl PipelineSettings {
    /// Temperature favoring varied phrasing over determinism.
    pub const DEFAULT_TEMPERATURE: f32 = 0.9;
    /// Default recipe length cap.
    pub const DEFAULT_MAX_TOKENS: u32 = 256;
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            chat_model: String::new(),
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Some(Self::DEFAULT_MAX_TOKENS),
            speech_model: String::new(),
            image_model: String::new(),
            mode: ExecutionMode::Sequential,
        }
    }
}

/// The three artifacts produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeArtifacts {
    /// Recipe text exactly as the chat provider returned it.
    pub recipe: String,
    /// Narration of the recipe.
    pub audio: SpeechResponse,
    /// First generated image.
    pub image_url: String,
}

/// Orchestrates the text, speech, and image providers.
#[derive(Clone)]
pub struct RecipePipeline {
    text: SharedChatProvider,
    speech: SharedSpeechProvider,
    images: SharedImageProvider,
    settings: PipelineSettings,
}

impl fmt::Debug for RecipePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipePipeline")
            .field("text", &self.text.provider_name())
            .field("speech", &self.speech.provider_name())
            .field("images", &self.images.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl RecipePipeline {
    /// Create a pipeline with default settings.
    #[must_use]
    pub fn new(
        text: SharedChatProvider,
        speech: SharedSpeechProvider,
        images: SharedImageProvider,
    ) -> Self {
        Self {
            text,
            speech,
            images,
            settings: PipelineSettings::default(),
        }
    }

    /// Replace the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Generate the recipe text for a food and calorie limit.
    ///
    /// The text is returned unmodified. A response without text is an error.
    pub async fn generate_recipe(&self, food: &str, calorie_limit: CalorieLimit) -> Result<String> {
        let prompt = build_prompt(food, calorie_limit)?;

        let mut request = ChatRequest::new(self.settings.chat_model.clone())
            .user(prompt)
            .temperature(self.settings.temperature);
        request.max_tokens = self.settings.max_tokens;

        debug!(provider = self.text.provider_name(), "generating recipe");
        let response = self.text.chat(&request).await?;

        match response.message.content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ProviderError::response_format("recipe text", "empty response")
                .for_provider(self.text.provider_name())
                .into()),
        }
    }

    /// Narrate `text` with `voice`.
    pub async fn synthesize_audio(&self, text: &str, voice: Voice) -> Result<SpeechResponse> {
        let request = SpeechRequest::new(self.settings.speech_model.clone(), text, voice);

        debug!(provider = self.speech.provider_name(), %voice, "synthesizing audio");
        self.speech.speech(&request).await
    }

    /// Generate images for the raw food name.
    pub async fn generate_images(&self, food: &str) -> Result<ImageResponse> {
        let request = ImageRequest::new(self.settings.image_model.clone(), food);

        debug!(provider = self.images.provider_name(), "generating images");
        self.images.generate(&request).await
    }

    async fn narrated_recipe(&self, request: &RecipeRequest) -> Result<(String, SpeechResponse)> {
        let recipe = self
            .generate_recipe(request.food(), request.calorie_limit())
            .await?;
        info!(chars = recipe.len(), "recipe generated");

        let audio = self.synthesize_audio(&recipe, request.voice()).await?;
        info!(bytes = audio.audio.len(), "audio synthesized");

        Ok((recipe, audio))
    }

    /// Run the whole pipeline for one request.
    pub async fn run(&self, request: &RecipeRequest) -> Result<RecipeArtifacts> {
        info!(
            food = request.food(),
            calories = request.calorie_limit().get(),
            voice = %request.voice(),
            mode = ?self.settings.mode,
            "starting recipe pipeline"
        );

        let ((recipe, audio), images) = match self.settings.mode {
            ExecutionMode::Sequential => {
                let narrated = self.narrated_recipe(request).await?;
                let images = self.generate_images(request.food()).await?;
                (narrated, images)
            }
            ExecutionMode::Concurrent => tokio::try_join!(
                self.narrated_recipe(request),
                self.generate_images(request.food())
            )?,
        };
        info!(count = images.urls.len(), "images generated");

        let image_url = images.into_first().ok_or_else(|| -> Error {
            ProviderError::response_format("at least one image", "empty output")
                .for_provider(self.images.provider_name())
                .into()
        })?;

        Ok(RecipeArtifacts {
            recipe,
            audio,
            image_url,
        })
    }
}
