use thiserror::Error;

use crate::ai::AiError;
use crate::models::Section;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The caller named a section that does not exist.
    #[error("unknown section '{0}'")]
    InvalidSection(String),

    /// The payload belongs to a different section than the one named.
    #[error("payload for section '{payload}' submitted as '{name}'")]
    SectionMismatch { name: String, payload: Section },

    #[error("tax year {0} is not supported")]
    UnsupportedYear(i32),

    /// Manual input is locked while the guided tour drives the wizard.
    #[error("the guided tour is active")]
    TourActive,

    #[error("the guided tour is not active")]
    TourInactive,

    #[error("an example data request is already in progress")]
    ExampleRequestPending,

    /// The example data fetch failed; state was left unchanged.
    #[error("example data could not be loaded: {0}")]
    Ai(#[from] AiError),
}
