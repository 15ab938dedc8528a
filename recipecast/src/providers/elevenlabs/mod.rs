//! ElevenLabs text-to-speech client.

mod client;
mod config;
mod speech;

pub use client::ElevenLabs;
pub use config::ElevenLabsConfig;
