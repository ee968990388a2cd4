// libs/registry-cell/src/router.rs
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::SharedRegistry;

pub fn registry_routes(registry: SharedRegistry) -> Router {
    Router::new()
        // Patients
        .route("/patients", post(handlers::register_patient))
        .route("/patients/search", post(handlers::search_patients))
        .route("/patients/{patient_id}", get(handlers::get_patient))
        .route("/patients/{patient_id}/history", post(handlers::get_medical_history))
        .route("/patients/{patient_id}/records", post(handlers::add_medical_record))

        // Doctors & appointments
        .route("/doctors/search", post(handlers::search_doctors))
        .route("/appointments", get(handlers::list_appointments))
        .route("/appointments/schedule", post(handlers::schedule_appointment))
        .route("/appointments/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/appointments/{appointment_id}/complete", post(handlers::complete_appointment))

        // Safety
        .route("/medications/check-interactions", post(handlers::check_interactions))
        .route("/audit", get(handlers::get_audit_log))
        .with_state(registry)
}
