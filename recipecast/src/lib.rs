//! Recipecast - recipe text, narration, and illustration from one request.
//!
//! This crate chains three generative services behind a single call: a chat
//! model writes a recipe, a speech model narrates it, and an image model
//! illustrates the dish. Backends sit behind small provider traits so the
//! [`RecipePipeline`] can be driven by real HTTP clients or by the mocks in
//! [`providers::mock`].

pub mod audio;
pub mod chat;
pub mod error;
pub mod image;
pub mod message;
pub mod pipeline;
pub mod prelude;
pub mod prompt;
pub mod providers;
pub mod recipe;

pub use error::{Error, ProviderError, ProviderErrorKind, Result};
pub use pipeline::{ExecutionMode, PipelineSettings, RecipeArtifacts, RecipePipeline};
pub use recipe::{CalorieLimit, RecipeRequest, ValidationError, Voice};
