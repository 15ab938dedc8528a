//! Mock providers for testing.
//!
//! Each mock returns a scripted outcome and records every request it
//! receives, so tests can check what the pipeline forwarded between steps
//! without making real API calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use recipecast::providers::mock::{MockChat, MockImages, MockSpeech};
//!
//! let chat = MockChat::new("Vegan Chili Recipe...");
//! let speech = MockSpeech::new(vec![0x00, 0x01]);
//! let images = MockImages::new(["http://img/1.png", "http://img/2.png"]);
//! ```

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::audio::{AudioFormat, SpeechRequest, SpeechResponse, TextToSpeechProvider};
use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{ProviderError, Result};
use crate::image::{ImageGenerationProvider, ImageRequest, ImageResponse};

/// Provider name reported by all mocks.
pub const MOCK_PROVIDER: &str = "mock";

/// Thread-safe log of received requests.
#[derive(Debug)]
struct CallLog<T>(Mutex<Vec<T>>);

impl<T: Clone> CallLog<T> {
    const fn new() -> Self {
        Self(Mutex::new(Vec::new()))
    }

    fn record(&self, request: &T) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
    }

    fn snapshot(&self) -> Vec<T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// A text-generation mock returning a fixed text or error.
#[derive(Debug)]
pub struct MockChat {
    outcome: std::result::Result<String, ProviderError>,
    calls: CallLog<ChatRequest>,
}

impl MockChat {
    /// A mock that always answers with `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            calls: CallLog::new(),
        }
    }

    /// A mock that always fails with `error`.
    #[must_use]
    pub const fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            calls: CallLog::new(),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.snapshot()
    }

    /// Number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.record(request);
        match &self.outcome {
            Ok(text) => Ok(ChatResponse::from_text(text.clone()).with_model("mock-model")),
            Err(err) => Err(err.clone().into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        MOCK_PROVIDER
    }
}

/// A speech-synthesis mock returning fixed audio bytes or an error.
#[derive(Debug)]
pub struct MockSpeech {
    outcome: std::result::Result<Vec<u8>, ProviderError>,
    calls: CallLog<SpeechRequest>,
}

impl MockSpeech {
    /// A mock that always returns `audio` as MP3.
    #[must_use]
    pub fn new(audio: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(audio.into()),
            calls: CallLog::new(),
        }
    }

    /// A mock that always fails with `error`.
    #[must_use]
    pub const fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            calls: CallLog::new(),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<SpeechRequest> {
        self.calls.snapshot()
    }

    /// Number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl TextToSpeechProvider for MockSpeech {
    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        self.calls.record(request);
        match &self.outcome {
            Ok(audio) => Ok(SpeechResponse::new(audio.clone(), AudioFormat::Mp3)),
            Err(err) => Err(err.clone().into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        MOCK_PROVIDER
    }
}

/// An image-generation mock returning fixed URLs or an error.
#[derive(Debug)]
pub struct MockImages {
    outcome: std::result::Result<Vec<String>, ProviderError>,
    calls: CallLog<ImageRequest>,
}

impl MockImages {
    /// A mock that always returns `urls`, in order.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outcome: Ok(urls.into_iter().map(Into::into).collect()),
            calls: CallLog::new(),
        }
    }

    /// A mock that always fails with `error`.
    #[must_use]
    pub const fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            calls: CallLog::new(),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ImageRequest> {
        self.calls.snapshot()
    }

    /// Number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl ImageGenerationProvider for MockImages {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageResponse> {
        self.calls.record(request);
        match &self.outcome {
            Ok(urls) => Ok(ImageResponse::new(urls.clone())),
            Err(err) => Err(err.clone().into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        MOCK_PROVIDER
    }
}
