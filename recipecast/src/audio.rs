//! Text-to-speech types and provider trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use recipecast::prelude::*;
//!
//! let request = SpeechRequest::new("eleven_monolingual_v1", "Preheat the oven.", Voice::Rachel);
//! let response = provider.speech(&request).await?;
//! std::fs::write("recipe.mp3", &response.audio)?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::recipe::Voice;

/// Encoded audio formats returned by speech backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    #[default]
    Mp3,
}

impl AudioFormat {
    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

/// Request for generating speech from text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Speech model identifier.
    pub model: String,
    /// Text to speak.
    pub input: String,
    /// Narrator voice.
    pub voice: Voice,
}

impl SpeechRequest {
    /// Create a new speech request.
    #[must_use]
    pub fn new(model: impl Into<String>, input: impl Into<String>, voice: Voice) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            voice,
        }
    }
}

/// Response from a speech synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResponse {
    /// The generated audio data.
    pub audio: Vec<u8>,
    /// The format of the audio data.
    pub format: AudioFormat,
}

impl SpeechResponse {
    /// Create a new speech response.
    #[must_use]
    pub const fn new(audio: Vec<u8>, format: AudioFormat) -> Self {
        Self { audio, format }
    }

    /// MIME type of the audio, for playback.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// A speech-synthesis backend.
#[async_trait]
pub trait TextToSpeechProvider: Send + Sync {
    /// Generate speech audio from text.
    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse>;

    /// Get the name of this provider.
    fn provider_name(&self) -> &'static str;
}

/// Type alias for an Arc-wrapped [`TextToSpeechProvider`].
pub type SharedSpeechProvider = std::sync::Arc<dyn TextToSpeechProvider>;
