//! Route handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use recipecast::{CalorieLimit, RecipeArtifacts, RecipeRequest, Voice};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::AppState;
use super::error::WebError;
use super::page::RecipeForm;

/// `GET /`: the empty form.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let page = state.pages.render(&RecipeForm::default(), None, None)?;
    Ok(Html(page))
}

/// `POST /recipe`: validate, run the pipeline, render the results.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<RecipeForm>,
) -> Result<(StatusCode, Html<String>), WebError> {
    let request = match form.parse() {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "rejected recipe form");
            let page = state.pages.render(&form, Some(&err.to_string()), None)?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)));
        }
    };

    match state.pipeline.run(&request).await {
        Ok(artifacts) => {
            info!(food = request.food(), "recipe ready");
            let page = state.pages.render(&form, None, Some(&artifacts))?;
            Ok((StatusCode::OK, Html(page)))
        }
        Err(err) => {
            error!(error = %err, food = request.food(), "recipe pipeline failed");
            let page = state.pages.render(&form, Some(&err.to_string()), None)?;
            Ok((StatusCode::BAD_GATEWAY, Html(page)))
        }
    }
}

/// JSON body for `POST /api/recipe`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecipeRequest {
    /// Food to cook.
    pub food: String,
    /// Calorie limit.
    #[serde(default = "default_calories")]
    pub calories: i64,
    /// Voice name.
    #[serde(default)]
    pub voice: Option<String>,
}

fn default_calories() -> i64 {
    i64::from(CalorieLimit::DEFAULT)
}

/// JSON response for `POST /api/recipe`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRecipeResponse {
    /// Recipe text, unmodified.
    pub recipe: String,
    /// Base64-encoded narration.
    pub audio_base64: String,
    /// MIME type of the narration.
    pub audio_mime: &'static str,
    /// First generated image.
    pub image_url: String,
}

impl From<RecipeArtifacts> for ApiRecipeResponse {
    fn from(artifacts: RecipeArtifacts) -> Self {
        Self {
            audio_base64: STANDARD.encode(&artifacts.audio.audio),
            audio_mime: artifacts.audio.mime_type(),
            recipe: artifacts.recipe,
            image_url: artifacts.image_url,
        }
    }
}

/// `POST /api/recipe`: the pipeline as JSON.
pub async fn api_recipe(
    State(state): State<AppState>,
    body: Result<Json<ApiRecipeRequest>, JsonRejection>,
) -> Result<Json<ApiRecipeResponse>, WebError> {
    let Json(body) = body.map_err(|rejection| WebError::Body(rejection.body_text()))?;

    let voice = body
        .voice
        .unwrap_or_else(|| Voice::default().to_string());
    let request = RecipeRequest::parse(&body.food, &body.calories.to_string(), &voice)?;

    let artifacts = state.pipeline.run(&request).await?;
    info!(food = request.food(), "recipe ready");

    Ok(Json(artifacts.into()))
}

/// `GET /health`.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "module": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
