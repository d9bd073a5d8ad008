use async_trait::async_trait;
use thiserror::Error;

use crate::models::{SectionData, TaxData};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// No credentials or endpoint configured; the provider was not contacted.
    #[error("AI provider not configured: {0}")]
    NotConfigured(String),

    #[error("request to AI provider failed: {0}")]
    Http(String),

    #[error("AI provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI provider returned no content")]
    EmptyResponse,

    #[error("could not decode AI provider response: {0}")]
    Decode(String),
}

/// Generative text provider used by the wizard.
#[async_trait]
pub trait AiAssistant: Send + Sync {
    /// Short plain-language explanation of a tax term.
    async fn explain(&self, topic: &str) -> Result<String, AiError>;

    /// Advisory bullet points derived from one section's data.
    async fn suggestions(&self, section: &SectionData, year: i32) -> Result<String, AiError>;

    /// A complete, plausible example declaration for `year`.
    async fn generate_example_data(&self, year: i32) -> Result<TaxData, AiError>;
}
