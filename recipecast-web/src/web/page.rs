//! HTML rendering for the recipe form and its results.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use minijinja::{Environment, context};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use recipecast::{
    CalorieLimit, RecipeArtifacts, RecipeRequest, ValidationError, Voice, audio::SpeechResponse,
};
use serde::{Deserialize, Serialize};

const INDEX_TEMPLATE: &str = "index.html";

/// Raw form fields, echoed back into the form on re-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeForm {
    /// Food to cook.
    pub food: String,
    /// Calorie limit, as typed.
    pub calories: String,
    /// Voice name.
    pub voice: String,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            food: String::new(),
            calories: CalorieLimit::default().to_string(),
            voice: Voice::default().to_string(),
        }
    }
}

impl RecipeForm {
    /// Validate the fields into a request.
    pub fn parse(&self) -> Result<RecipeRequest, ValidationError> {
        RecipeRequest::parse(&self.food, &self.calories, &self.voice)
    }
}

/// Rendered artifacts, ready for the template.
#[derive(Debug, Clone, Serialize)]
struct ResultView {
    recipe_html: String,
    audio_src: String,
    image_url: String,
}

impl From<&RecipeArtifacts> for ResultView {
    fn from(artifacts: &RecipeArtifacts) -> Self {
        Self {
            recipe_html: render_markdown(&artifacts.recipe),
            audio_src: audio_data_uri(&artifacts.audio),
            image_url: artifacts.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct VoiceOption {
    name: &'static str,
}

/// Page templates.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Compile the templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    /// Render the form page, optionally with an error message or results.
    pub fn render(
        &self,
        form: &RecipeForm,
        error: Option<&str>,
        artifacts: Option<&RecipeArtifacts>,
    ) -> Result<String, minijinja::Error> {
        let voices: Vec<VoiceOption> = Voice::ALL
            .iter()
            .map(|voice| VoiceOption {
                name: voice.as_str(),
            })
            .collect();

        self.env.get_template(INDEX_TEMPLATE)?.render(context! {
            form => form,
            voices => voices,
            min_calories => CalorieLimit::MIN,
            max_calories => CalorieLimit::MAX,
            error => error,
            result => artifacts.map(ResultView::from),
        })
    }
}

/// Replacement target for links and images with a disallowed scheme.
const BLOCKED_URL: &str = "#";

/// Whether a link or image URL may be emitted as is.
///
/// Relative URLs pass; absolute ones must be http or https. Whitespace and
/// control characters are ignored when reading the scheme, as browsers do.
fn is_allowed_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    match cleaned.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        _ => true,
    }
}

/// Render recipe Markdown to HTML.
///
/// Raw HTML in the model output is emitted as escaped text, and links or
/// images with a non-http(s) scheme point nowhere.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) if !is_allowed_url(&dest_url) => Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::Borrowed(BLOCKED_URL),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) if !is_allowed_url(&dest_url) => Event::Start(Tag::Image {
                link_type,
                dest_url: CowStr::Borrowed(BLOCKED_URL),
                title,
                id,
            }),
            other => other,
        });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Base64 data URI for inline playback.
#[must_use]
pub fn audio_data_uri(audio: &SpeechResponse) -> String {
    format!("data:{};base64,{}", audio.mime_type(), STANDARD.encode(&audio.audio))
}
