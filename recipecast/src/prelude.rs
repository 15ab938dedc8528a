//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use recipecast::prelude::*;
//! ```

pub use crate::audio::{
    AudioFormat, SharedSpeechProvider, SpeechRequest, SpeechResponse, TextToSpeechProvider,
};
pub use crate::chat::{ChatProvider, ChatRequest, ChatResponse, SharedChatProvider, StopReason};
pub use crate::error::{Error, ProviderError, ProviderErrorKind, Result};
pub use crate::image::{ImageGenerationProvider, ImageRequest, ImageResponse, SharedImageProvider};
pub use crate::message::{Message, Role};
pub use crate::pipeline::{ExecutionMode, PipelineSettings, RecipeArtifacts, RecipePipeline};
pub use crate::prompt::build_prompt;
pub use crate::providers::{
    ElevenLabs, ElevenLabsConfig, OpenAI, OpenAIConfig, Replicate, ReplicateConfig,
};
pub use crate::recipe::{CalorieLimit, RecipeRequest, ValidationError, Voice};
