pub mod error;
pub mod models;
pub mod handlers;
pub mod router;
pub mod services;

pub use error::AgentError;
pub use models::*;
pub use handlers::AgentState;
pub use router::*;
pub use services::agent::ClinicalAgent;
pub use services::completion::{
    ChatMessage, ChatRole, CompletionError, CompletionService, OpenAiCompletionService,
};
pub use services::intent::{classify, Intent};
pub use services::session::{ChatCommand, ChatSession, SessionReply};
