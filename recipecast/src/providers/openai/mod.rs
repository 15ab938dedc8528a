//! OpenAI API client implementation.
//!
//! Only chat completions are used: the recipe text is generated from a single
//! user prompt.

mod chat;
mod client;
mod config;
mod types;

pub use client::OpenAI;
pub use config::OpenAIConfig;
