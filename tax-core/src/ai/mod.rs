pub mod assistant;
pub mod service;

pub use assistant::{AiAssistant, AiError};
pub use service::AssistantService;
