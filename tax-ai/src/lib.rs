//! Gemini-backed implementation of [`tax_core::AiAssistant`].

mod client;
mod prompts;
mod schema;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiAssistant, GeminiConfig};
