//! Recipecast web front-end.
//!
//! Serves the recipe form, runs the [`recipecast::RecipePipeline`] on
//! submission, and renders the recipe, its narration, and an illustration.
//! The same pipeline is exposed as a JSON endpoint.

pub mod app;
pub mod config;
pub mod web;

pub use app::{AppError, build_pipeline, mock_pipeline};
pub use config::{AppConfig, ConfigError, load_config};
pub use web::{AppState, WebError, build_router};
