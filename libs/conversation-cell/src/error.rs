use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored history is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid patient key: {0:?}")]
    InvalidKey(String),
}

impl ConversationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConversationError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            ConversationError::Io(_) | ConversationError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ConversationError> for AppError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::InvalidKey(_) => AppError::BadRequest(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ConversationError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_maps_to_bad_request() {
        let err = ConversationError::InvalidKey("../etc".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(err).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_failure_is_internal() {
        let err = ConversationError::from(std::io::Error::other("disk full"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
