//! Wiring from configuration to a running pipeline.

use std::sync::Arc;

use recipecast::RecipePipeline;
use recipecast::providers::{ElevenLabs, OpenAI, Replicate};
use recipecast::providers::mock::{MockChat, MockImages, MockSpeech};
use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::web::WebError;

/// Start-up failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A backend client could not be created.
    #[error(transparent)]
    Provider(#[from] recipecast::Error),

    /// The web layer could not be initialized.
    #[error(transparent)]
    Web(#[from] WebError),

    /// Binding or serving failed.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

const MOCK_RECIPE: &str = "# Mock Recipe\n\n\
    A placeholder recipe served without contacting any backend.\n\n\
    ## Ingredients\n\n- 1 cup of imagination\n- A pinch of salt\n\n\
    ## Steps\n\n1. Combine everything.\n2. Serve warm.\n";

const MOCK_IMAGE: &str = "https://placehold.co/768x768?text=Recipe";

/// Pipeline backed by the real HTTP clients.
pub fn build_pipeline(config: &AppConfig) -> Result<RecipePipeline, AppError> {
    let text = OpenAI::new(config.openai_config())?;
    let speech = ElevenLabs::new(config.elevenlabs_config())?;
    let images = Replicate::new(config.replicate_config())?;
    info!(
        chat = text.model(),
        speech = speech.model(),
        mode = ?config.pipeline.mode,
        "backends configured"
    );

    Ok(
        RecipePipeline::new(Arc::new(text), Arc::new(speech), Arc::new(images))
            .with_settings(config.pipeline_settings()),
    )
}

/// Pipeline answering every request with canned artifacts.
#[must_use]
pub fn mock_pipeline(config: &AppConfig) -> RecipePipeline {
    info!("using mock backends");
    RecipePipeline::new(
        Arc::new(MockChat::new(MOCK_RECIPE)),
        Arc::new(MockSpeech::new(vec![0xFF, 0xF3, 0x44, 0xC4])),
        Arc::new(MockImages::new([MOCK_IMAGE])),
    )
    .with_settings(config.pipeline_settings())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use recipecast::{RecipeRequest, Voice};

    #[test]
    fn real_pipeline_builds_without_credentials() {
        let pipeline = build_pipeline(&AppConfig::default()).unwrap();
        assert_eq!(pipeline.settings().chat_model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn mock_pipeline_runs() {
        let pipeline = mock_pipeline(&AppConfig::default());
        let request = RecipeRequest::new("soup", 300, Voice::Josh).unwrap();

        let artifacts = pipeline.run(&request).await.unwrap();
        assert!(artifacts.recipe.starts_with("# Mock Recipe"));
        assert_eq!(artifacts.image_url, MOCK_IMAGE);
    }
}
