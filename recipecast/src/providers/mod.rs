//! Backend provider implementations.
//!
//! # Available Backends
//!
//! - [`openai`] - OpenAI chat completions (recipe text)
//! - [`elevenlabs`] - ElevenLabs text-to-speech (recipe narration)
//! - [`replicate`] - Replicate predictions (Stable Diffusion illustration)
//! - [`mock`] - Scripted in-memory providers for tests and offline demos

pub mod elevenlabs;
pub mod mock;
pub mod openai;
pub mod replicate;

pub use elevenlabs::{ElevenLabs, ElevenLabsConfig};
pub use openai::{OpenAI, OpenAIConfig};
pub use replicate::{Replicate, ReplicateConfig};
