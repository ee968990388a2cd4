use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use conversation_cell::ConversationError;
use registry_cell::ClinicalError;

use crate::services::completion::CompletionError;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Clinical(#[from] ClinicalError),

    #[error("Text generation failed: {0}")]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Conversation(#[from] ConversationError),
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        match self {
            AgentError::Clinical(err) => err.into_response(),
            AgentError::Conversation(err) => err.into_response(),
            AgentError::Completion(err) => {
                tracing::error!("Agent fallback failed: {}", err);
                let body = json!({
                    "success": false,
                    "error_kind": "completion",
                    "error": err.to_string(),
                });
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}
