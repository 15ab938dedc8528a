//! HTTP surface: the recipe form, the JSON API, and a health probe.

pub mod error;
pub mod handlers;
pub mod page;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use recipecast::RecipePipeline;
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use page::{Pages, RecipeForm};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) pipeline: Arc<RecipePipeline>,
    pub(crate) pages: Arc<Pages>,
}

impl AppState {
    /// Wrap a pipeline and compile the page templates.
    pub fn new(pipeline: RecipePipeline) -> Result<Self, WebError> {
        Ok(Self {
            pipeline: Arc::new(pipeline),
            pages: Arc::new(Pages::new()?),
        })
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/recipe", post(handlers::submit_form))
        .route("/api/recipe", post(handlers::api_recipe))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
