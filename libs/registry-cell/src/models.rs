// libs/registry-cell/src/models.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Every appointment occupies a fixed slot of this length.
pub const APPOINTMENT_DURATION_MINUTES: i64 = 30;

// ==============================================================================
// CORE REGISTRY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub insurance: Option<String>,
    pub insurance_id: Option<String>,
    pub emergency_contact: Option<String>,
    pub allergies: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub last_visit: Option<NaiveDate>,
    pub registered_date: Option<NaiveDateTime>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub specialty: String,
    pub license_number: String,
    pub phone: String,
    pub email: String,
    /// Full English weekday names, e.g. "Monday".
    pub available_days: Vec<String>,
    pub consultation_fee: u32,
}

impl Doctor {
    pub fn is_available_on(&self, day_name: &str) -> bool {
        self.available_days.iter().any(|day| day == day_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub appointment_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub reason: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub consultation_fee: u32,
    pub created_at: NaiveDateTime,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// `None` when the slot would run past the last representable instant.
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.appointment_time
            .checked_add_signed(chrono::Duration::minutes(self.duration_minutes))
    }

    /// Cancelled appointments release their slot.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub record_id: String,
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub date: NaiveDateTime,
    pub diagnosis: String,
    pub symptoms: Vec<String>,
    pub prescribed_medications: Vec<Prescription>,
    pub notes: String,
    pub follow_up_required: bool,
    pub follow_up_date: Option<NaiveDate>,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Prescription {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// Taken from the registry clock.
    pub timestamp: NaiveDateTime,
    pub operation: String,
    pub details: Value,
    pub success: bool,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Search filters; `None` and empty strings are wildcards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientSearchQuery {
    pub patient_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialty: Option<String>,
    pub doctor_id: Option<String>,
    #[serde(alias = "available_on")]
    pub available_day: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    /// `YYYY-MM-DD` prefix of the appointment time.
    pub date: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub gender: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub insurance: Option<String>,
    pub insurance_id: Option<String>,
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    /// `YYYY-MM-DD`, or a full `YYYY-MM-DDTHH:MM` timestamp when `appointment_time` is empty.
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_time: String,
    pub reason: String,
    #[serde(default = "default_appointment_type")]
    pub appointment_type: String,
}

fn default_appointment_type() -> String {
    "Consultation".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddMedicalRecordRequest {
    pub appointment_id: Option<String>,
    pub diagnosis: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub prescribed_medications: Vec<Prescription>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub follow_up_required: bool,
    pub follow_up_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionCheckRequest {
    pub medications: Vec<String>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredPatient {
    pub patient_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledAppointment {
    pub appointment_id: String,
    pub details: AppointmentDetails,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDetails {
    pub patient: String,
    pub doctor: String,
    pub specialty: String,
    /// e.g. "January 07, 2030 at 10:00 AM"
    pub date_time: String,
    pub reason: String,
    /// e.g. "$150"
    pub fee: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancelledAppointment {
    pub appointment_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordCreated {
    pub record_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalHistory {
    pub patient_id: String,
    pub patient_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub allergies: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub last_visit: Option<NaiveDate>,
    pub total_visits: usize,
    pub upcoming_appointments: usize,
    pub cancelled_appointments: usize,
    /// Newest first.
    pub medical_records: Vec<MedicalRecord>,
    /// First five of the patient's appointments in ascending time order.
    pub recent_appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    High,
    Moderate,
}

impl Severity {
    pub fn from_description(description: &str) -> Self {
        if description.contains("High") {
            Severity::High
        } else {
            Severity::Moderate
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugInteraction {
    pub drugs: [String; 2],
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionReport {
    pub medications_checked: Vec<String>,
    pub interactions_found: usize,
    pub interactions: Vec<DrugInteraction>,
    pub safe: bool,
}
