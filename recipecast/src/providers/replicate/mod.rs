//! Replicate image generation client.
//!
//! Replicate runs models as asynchronous *predictions*: a prediction is
//! created, then polled until it reaches a terminal status.

mod client;
mod config;
mod prediction;

pub use client::Replicate;
pub use config::ReplicateConfig;
pub use prediction::{Prediction, PredictionStatus};
