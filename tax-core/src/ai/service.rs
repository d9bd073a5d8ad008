//! Fallback policy around an [`AiAssistant`].
//!
//! Explanations and suggestions are advisory, so their failures are turned
//! into fixed messages here and never reach the wizard. Example data is
//! different: a failed fetch must be reported so the user can retry.

use std::sync::Arc;

use tracing::{debug, warn};

use super::assistant::{AiAssistant, AiError};
use crate::models::{SectionData, TaxData};

pub const EXPLANATION_UNAVAILABLE: &str =
    "Der KI-Assistent ist derzeit nicht verfügbar, da die API-Konfiguration fehlt.";
pub const EXPLANATION_FAILED: &str =
    "Entschuldigung, es ist ein Fehler aufgetreten. Bitte versuchen Sie es später erneut.";
pub const SUGGESTIONS_FAILED: &str = "Fehler beim Abrufen der Vorschläge.";

#[derive(Clone)]
pub struct AssistantService {
    inner: Arc<dyn AiAssistant>,
}

impl AssistantService {
    pub fn new(inner: Arc<dyn AiAssistant>) -> Self {
        Self { inner }
    }

    /// Never fails; provider problems yield a fixed German message.
    pub async fn explain(&self, topic: &str) -> String {
        match self.inner.explain(topic).await {
            Ok(text) => text,
            Err(AiError::NotConfigured(reason)) => {
                debug!(topic, %reason, "explanation skipped");
                EXPLANATION_UNAVAILABLE.to_string()
            }
            Err(error) => {
                warn!(topic, %error, "explanation request failed");
                EXPLANATION_FAILED.to_string()
            }
        }
    }

    /// Empty section data yields an empty string without contacting the
    /// provider; so does an unconfigured provider.
    pub async fn suggestions(&self, section: &SectionData, year: i32) -> String {
        if section.is_empty() {
            return String::new();
        }

        match self.inner.suggestions(section, year).await {
            Ok(text) => text,
            Err(AiError::NotConfigured(_)) => String::new(),
            Err(error) => {
                warn!(section = %section.section(), year, %error, "suggestion request failed");
                SUGGESTIONS_FAILED.to_string()
            }
        }
    }

    pub async fn generate_example_data(&self, year: i32) -> Result<TaxData, AiError> {
        self.inner.generate_example_data(year).await
    }
}

impl std::fmt::Debug for AssistantService {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("AssistantService").finish_non_exhaustive()
    }
}
