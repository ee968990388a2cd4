use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ClinicalError;
use crate::models::{
    AddMedicalRecordRequest, AppointmentSearchQuery, CancelAppointmentRequest, DoctorSearchQuery,
    InteractionCheckRequest, PatientSearchQuery, RegisterPatientRequest,
    ScheduleAppointmentRequest,
};
use crate::services::audit::DEFAULT_AUDIT_LIMIT;
use crate::services::SharedRegistry;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<usize>,
}

// ==============================================================================
// PATIENT HANDLERS
// ==============================================================================

pub async fn register_patient(
    State(registry): State<SharedRegistry>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, ClinicalError> {
    let registered = registry.lock().await.register_patient(request)?;
    Ok(Json(json!({ "success": true, "patient_id": registered.patient_id, "message": registered.message })))
}

pub async fn search_patients(
    State(registry): State<SharedRegistry>,
    Query(query): Query<PatientSearchQuery>,
) -> Json<Value> {
    let patients = registry.lock().await.search_patients(&query);

    Json(json!({
        "total": patients.len(),
        "patients": patients,
    }))
}

pub async fn get_patient(
    State(registry): State<SharedRegistry>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ClinicalError> {
    let patient = registry.lock().await.get_patient(&patient_id)?;
    Ok(Json(json!(patient)))
}

pub async fn get_medical_history(
    State(registry): State<SharedRegistry>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ClinicalError> {
    let history = registry.lock().await.get_medical_history(&patient_id)?;
    Ok(Json(json!(history)))
}

pub async fn add_medical_record(
    State(registry): State<SharedRegistry>,
    Path(patient_id): Path<String>,
    Json(request): Json<AddMedicalRecordRequest>,
) -> Result<Json<Value>, ClinicalError> {
    let created = registry.lock().await.add_medical_record(&patient_id, request)?;
    Ok(Json(json!({ "success": true, "record_id": created.record_id, "message": created.message })))
}

// ==============================================================================
// DOCTOR & APPOINTMENT HANDLERS
// ==============================================================================

pub async fn search_doctors(
    State(registry): State<SharedRegistry>,
    Json(query): Json<DoctorSearchQuery>,
) -> Json<Value> {
    let doctors = registry.lock().await.search_doctors(&query);

    Json(json!({
        "total": doctors.len(),
        "doctors": doctors,
    }))
}

pub async fn list_appointments(
    State(registry): State<SharedRegistry>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Json<Value> {
    let appointments = registry.lock().await.get_appointments(&query);

    Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    }))
}

pub async fn schedule_appointment(
    State(registry): State<SharedRegistry>,
    Json(request): Json<ScheduleAppointmentRequest>,
) -> Result<Json<Value>, ClinicalError> {
    let scheduled = registry.lock().await.schedule_appointment(request)?;

    Ok(Json(json!({
        "success": true,
        "appointment_id": scheduled.appointment_id,
        "details": scheduled.details,
        "message": scheduled.message,
    })))
}

pub async fn cancel_appointment(
    State(registry): State<SharedRegistry>,
    Path(appointment_id): Path<String>,
    body: Option<Json<CancelAppointmentRequest>>,
) -> Result<Json<Value>, ClinicalError> {
    let reason = body.and_then(|Json(request)| request.reason);
    let cancelled = registry
        .lock()
        .await
        .cancel_appointment(&appointment_id, reason)?;

    Ok(Json(json!({
        "success": true,
        "appointment_id": cancelled.appointment_id,
        "message": cancelled.message,
    })))
}

pub async fn complete_appointment(
    State(registry): State<SharedRegistry>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, ClinicalError> {
    let appointment = registry.lock().await.complete_appointment(&appointment_id)?;
    Ok(Json(json!({ "success": true, "appointment": appointment })))
}

// ==============================================================================
// SAFETY HANDLERS
// ==============================================================================

pub async fn check_interactions(
    State(registry): State<SharedRegistry>,
    Json(request): Json<InteractionCheckRequest>,
) -> Json<Value> {
    let report = registry
        .lock()
        .await
        .check_drug_interactions(&request.medications);
    Json(json!(report))
}

pub async fn get_audit_log(
    State(registry): State<SharedRegistry>,
    Query(query): Query<AuditQuery>,
) -> Json<Value> {
    let registry = registry.lock().await;
    let entries = registry.recent_audit_entries(query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT));

    Json(json!({
        "total": entries.len(),
        "entries": entries,
    }))
}
