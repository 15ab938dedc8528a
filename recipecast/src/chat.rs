//! Chat types and the text-generation provider trait.
//!
//! This module provides:
//! - [`ChatRequest`]: Request parameters for chat completions
//! - [`ChatResponse`]: Response from chat completions
//! - [`ChatProvider`]: Core trait for text-generation backends
//!
//! # Example
//!
//! ```rust,ignore
//! use recipecast::prelude::*;
//!
//! let request = ChatRequest::new("gpt-4o-mini")
//!     .user("Create a recipe for pancakes.")
//!     .temperature(0.9);
//!
//! let response = provider.chat(&request).await?;
//! println!("{}", response.text().unwrap_or_default());
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// A chat completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier; empty means the provider's default model.
    #[serde(default)]
    pub model: String,

    /// Conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Creates a new request for the given model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Adds a user message.
    #[must_use]
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum number of tokens to generate.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of output.
    #[default]
    Stop,
    /// Hit the token limit.
    Length,
    /// Output was filtered.
    ContentFilter,
}

/// A chat completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated message.
    pub message: Message,

    /// Why the model stopped generating.
    pub stop_reason: StopReason,

    /// Model identifier used for this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatResponse {
    /// Creates a new response with a message.
    #[must_use]
    pub const fn new(message: Message) -> Self {
        Self {
            message,
            stop_reason: StopReason::Stop,
            model: None,
        }
    }

    /// Creates a response from text content.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(Message::assistant(content))
    }

    /// Sets the stop reason.
    #[must_use]
    pub const fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = reason;
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the text content of the response.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }
}

/// A text-generation backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and receive a complete response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the name of this provider, used for logging and error messages.
    fn provider_name(&self) -> &'static str;
}

/// Type alias for an Arc-wrapped [`ChatProvider`].
pub type SharedChatProvider = std::sync::Arc<dyn ChatProvider>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn builder_collects_messages_and_params() {
        let req = ChatRequest::new("gpt-4o-mini")
            .user("Hello")
            .temperature(0.9)
            .max_tokens(256);

        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.temperature, Some(0.9));
        assert_eq!(req.max_tokens, Some(256));
    }

    #[test]
    fn response_text() {
        let resp = ChatResponse::from_text("Done").with_model("gpt-4o-mini");
        assert_eq!(resp.text(), Some("Done"));
        assert_eq!(resp.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(resp.stop_reason, StopReason::Stop);
    }
}
