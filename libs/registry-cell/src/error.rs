use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Duplicate,
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Patient,
    Doctor,
    Appointment,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Patient => write!(f, "Patient"),
            Entity::Doctor => write!(f, "Doctor"),
            Entity::Appointment => write!(f, "Appointment"),
        }
    }
}

/// Failures returned by registry and scheduler operations. Each variant
/// carries the data a caller needs to correct the request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClinicalError {
    #[error("{0}")]
    Validation(String),

    #[error("Doctor not available on {day}")]
    DoctorUnavailable {
        day: String,
        available_days: Vec<String>,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("Patient with same name and DOB already exists: {existing_patient_id}")]
    Duplicate { existing_patient_id: String },

    #[error("Time slot already booked (conflicts with {conflicting_appointment})")]
    Conflict { conflicting_appointment: String },
}

impl ClinicalError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClinicalError::Validation(message.into())
    }

    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        ClinicalError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClinicalError::Validation(_) | ClinicalError::DoctorUnavailable { .. } => {
                ErrorKind::Validation
            }
            ClinicalError::NotFound { .. } => ErrorKind::NotFound,
            ClinicalError::Duplicate { .. } => ErrorKind::Duplicate,
            ClinicalError::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Duplicate | ErrorKind::Conflict => StatusCode::CONFLICT,
        }
    }

    /// Structured failure payload, shared by the HTTP layer and the agent.
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error_kind": self.kind(),
            "error": self.to_string(),
        });

        match self {
            ClinicalError::DoctorUnavailable { available_days, .. } => {
                body["available_days"] = json!(available_days);
            }
            ClinicalError::Conflict {
                conflicting_appointment,
            } => {
                body["conflicting_appointment"] = json!(conflicting_appointment);
            }
            ClinicalError::Duplicate {
                existing_patient_id,
            } => {
                body["existing_patient_id"] = json!(existing_patient_id);
            }
            ClinicalError::Validation(_) | ClinicalError::NotFound { .. } => {}
        }

        body
    }
}

impl IntoResponse for ClinicalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(error_kind = ?self.kind(), "Clinical operation failed: {}", self);
        (status, Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_doctor_is_a_validation_failure() {
        let err = ClinicalError::DoctorUnavailable {
            day: "Sunday".to_string(),
            available_days: vec!["Monday".to_string()],
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_body();
        assert_eq!(body["error_kind"], "validation");
        assert_eq!(body["available_days"], json!(["Monday"]));
    }

    #[test]
    fn conflict_body_names_the_blocking_appointment() {
        let err = ClinicalError::Conflict {
            conflicting_appointment: "APT000001".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_body()["conflicting_appointment"], "APT000001");
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = ClinicalError::not_found(Entity::Patient, "PT999999");
        assert_eq!(err.to_string(), "Patient not found: PT999999");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
