//! OpenAI ChatProvider implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason};
use crate::error::{ProviderError, Result};
use crate::message::Message;

use super::client::OpenAI;
use super::types::OpenAIChatResponse;

impl OpenAI {
    /// Parse the response into ChatResponse.
    pub(crate) fn parse_response(response: OpenAIChatResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::response_format("at least one choice", "empty choices"))?;

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("length") => StopReason::Length,
            Some("content_filter") => StopReason::ContentFilter,
            _ => StopReason::Stop,
        };

        let content = match (choice.message.content, choice.message.refusal) {
            (Some(text), _) => text,
            (None, Some(refusal)) => {
                return Err(ProviderError::provider_code(Self::PROVIDER, "refusal", refusal).into());
            }
            (None, None) => {
                return Err(ProviderError::response_format("message content", "null").into());
            }
        };

        Ok(ChatResponse::new(Message::assistant(content))
            .with_stop_reason(stop_reason)
            .with_model(response.model))
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.build_body(request);
        debug!(model = %body.model, messages = body.messages.len(), "sending chat completion");

        let response = self
            .build_request(&url)?
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?;
        let parsed: OpenAIChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            ProviderError::response_format(
                "valid OpenAI response",
                format!("parse error: {e}, response: {response_text}"),
            )
            .for_provider(Self::PROVIDER)
        })?;

        Self::parse_response(parsed)
    }

    fn provider_name(&self) -> &'static str {
        Self::PROVIDER
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{Error, ProviderErrorKind};

    fn response(json: &str) -> OpenAIChatResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_first_choice() {
        let parsed = OpenAI::parse_response(response(
            r#"{"model": "gpt-4o-mini", "choices": [
                {"message": {"content": "First"}, "finish_reason": "length"},
                {"message": {"content": "Second"}, "finish_reason": "stop"}
            ]}"#,
        ))
        .unwrap();

        assert_eq!(parsed.text(), Some("First"));
        assert_eq!(parsed.stop_reason, StopReason::Length);
        assert_eq!(parsed.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn empty_choices_is_an_error() {
        let err = OpenAI::parse_response(response(r#"{"model": "m", "choices": []}"#)).unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ref e) if e.kind == ProviderErrorKind::ResponseFormat
        ));
    }

    #[test]
    fn null_content_is_an_error() {
        let err = OpenAI::parse_response(response(
            r#"{"model": "m", "choices": [{"message": {"content": null}, "finish_reason": "stop"}]}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn refusal_is_surfaced() {
        let err = OpenAI::parse_response(response(
            r#"{"model": "m", "choices": [{"message": {"content": null, "refusal": "No."}, "finish_reason": "stop"}]}"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("No."));
    }
}
