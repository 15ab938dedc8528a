//! ElevenLabs TextToSpeechProvider implementation.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::audio::{AudioFormat, SpeechRequest, SpeechResponse, TextToSpeechProvider};
use crate::error::{ProviderError, Result};

use super::client::ElevenLabs;

/// ElevenLabs text-to-speech request body.
#[derive(Debug, Clone, Serialize)]
struct ElevenLabsSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs `output_format` query value for 44.1 kHz, 128 kbps MP3.
const OUTPUT_FORMAT: &str = "mp3_44100_128";

#[async_trait]
impl TextToSpeechProvider for ElevenLabs {
    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        let url = format!(
            "{}?output_format={OUTPUT_FORMAT}",
            self.speech_url(request.voice.voice_id())
        );
        let model = if request.model.is_empty() {
            self.model()
        } else {
            request.model.as_str()
        };
        let body = ElevenLabsSpeechRequest {
            text: &request.input,
            model_id: model,
        };
        debug!(voice = %request.voice, model, chars = request.input.len(), "synthesizing speech");

        let response = self
            .build_request(&url)?
            .header("Accept", AudioFormat::Mp3.mime_type())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from(e).for_provider(Self::PROVIDER))?
            .to_vec();

        if audio.is_empty() {
            return Err(ProviderError::response_format("audio bytes", "empty body")
                .for_provider(Self::PROVIDER)
                .into());
        }

        Ok(SpeechResponse::new(audio, AudioFormat::Mp3))
    }

    fn provider_name(&self) -> &'static str {
        Self::PROVIDER
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_model_id_field() {
        let body = ElevenLabsSpeechRequest {
            text: "Chop the onions.",
            model_id: "eleven_monolingual_v1",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "Chop the onions.");
        assert_eq!(json["model_id"], "eleven_monolingual_v1");
    }
}
