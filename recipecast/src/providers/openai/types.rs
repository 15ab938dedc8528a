//! OpenAI wire types.

use serde::{Deserialize, Serialize};

/// OpenAI chat completion request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OpenAIChatRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// OpenAI message format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIChatResponse {
    pub model: String,
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

/// OpenAI response choice.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
    pub finish_reason: Option<String>,
}

/// OpenAI response message.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIResponseMessage {
    pub content: Option<String>,
    /// Refusal message if the model declined to respond.
    #[serde(default)]
    pub refusal: Option<String>,
}

/// OpenAI error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIErrorResponse {
    pub error: OpenAIError,
}

/// OpenAI error details.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_skips_unset_params() {
        let req = OpenAIChatRequest {
            model: "gpt-4o-mini".to_owned(),
            messages: vec![OpenAIMessage {
                role: "user".to_owned(),
                content: "Hi".to_owned(),
            }],
            max_tokens: None,
            temperature: None,
        };

        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn response_deserializes_minimal_choice() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Chili"},
                "finish_reason": "stop"
            }]
        }"#;

        let resp: OpenAIChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.choices.len(), 1);
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("Chili"));
    }

    #[test]
    fn error_without_type() {
        let json = r#"{"error": {"message": "bad", "code": null}}"#;
        let resp: OpenAIErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.error.message, "bad");
        assert!(resp.error.error_type.is_none());
    }
}
