//! Core of the tax declaration wizard: the data model, allowance
//! calculations, the step gate, the session state machine with its guided
//! tour, and the ports for persistence and the AI assistant.

pub mod ai;
pub mod calculations;
pub mod models;
pub mod store;
pub mod summary;
pub mod validation;
pub mod wizard;

pub use ai::{AiAssistant, AiError, AssistantService};
pub use models::*;
pub use store::{StoreConfig, StoreError, StoreFactory, StoreRegistry, TaxDataStore};
pub use summary::DeclarationSummary;
pub use wizard::{WizardError, WizardSession, WizardState};
