use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use shared_utils::text::digits_only;

use crate::error::{ClinicalError, Entity};
use crate::models::{
    Appointment, AppointmentStatus, AuditEntry, Doctor, DoctorSearchQuery, MedicalHistory,
    MedicalRecord, Patient, PatientSearchQuery, RegisterPatientRequest, RegisteredPatient,
};
use crate::services::{seed, validation};

/// Source of "now" for scheduling and record dates.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Registry handle shared by the HTTP handlers.
pub type SharedRegistry = Arc<Mutex<Registry>>;

/// In-memory store of clinical entities. Operations take `&mut self`
/// because every lookup is recorded in the audit log; callers that share a
/// registry must serialize access themselves.
pub struct Registry {
    pub(crate) patients: Vec<Patient>,
    pub(crate) doctors: Vec<Doctor>,
    pub(crate) appointments: Vec<Appointment>,
    pub(crate) medical_records: Vec<MedicalRecord>,
    pub(crate) audit_log: Vec<AuditEntry>,
    pub(crate) next_patient_seq: u32,
    pub(crate) next_appointment_seq: u32,
    pub(crate) next_record_seq: u32,
    clock: Clock,
}

impl Registry {
    pub fn new(patients: Vec<Patient>, doctors: Vec<Doctor>) -> Self {
        let next_patient_seq = next_sequence(patients.iter().map(|p| p.patient_id.as_str()), "PT");

        Self {
            patients,
            doctors,
            appointments: Vec::new(),
            medical_records: Vec::new(),
            audit_log: Vec::new(),
            next_patient_seq,
            next_appointment_seq: 1,
            next_record_seq: 1,
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    /// Registry pre-populated with the demo patients and doctors.
    pub fn seeded() -> Self {
        Self::new(seed::patients(), seed::doctors())
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn medical_records(&self) -> &[MedicalRecord] {
        &self.medical_records
    }

    pub(crate) fn find_patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.patient_id == patient_id)
    }

    pub(crate) fn find_patient_mut(&mut self, patient_id: &str) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.patient_id == patient_id)
    }

    pub(crate) fn find_doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.doctor_id == doctor_id)
    }

    // ==============================================================================
    // PATIENTS
    // ==============================================================================

    pub fn search_patients(&mut self, query: &PatientSearchQuery) -> Vec<Patient> {
        debug!("Searching patients with query: {:?}", query);

        let results: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| patient_matches(p, query))
            .cloned()
            .collect();

        self.record_audit(
            "search_patients",
            json!({
                "criteria": query,
                "results_count": results.len(),
            }),
            true,
        );

        results
    }

    pub fn get_patient(&mut self, patient_id: &str) -> Result<Patient, ClinicalError> {
        let result = if !validation::is_valid_patient_id(patient_id) {
            Err(ClinicalError::validation(
                "Invalid patient ID format. Expected: PT######",
            ))
        } else {
            self.find_patient(patient_id)
                .cloned()
                .ok_or_else(|| ClinicalError::not_found(Entity::Patient, patient_id))
        };

        self.audit_result("get_patient_details", json!({ "patient_id": patient_id }), &result);
        result
    }

    pub fn register_patient(
        &mut self,
        request: RegisterPatientRequest,
    ) -> Result<RegisteredPatient, ClinicalError> {
        let name = format!("{} {}", request.first_name, request.last_name);
        let result = self.try_register_patient(request);
        let details = match &result {
            Ok(registered) => json!({ "patient_id": registered.patient_id, "name": name }),
            Err(_) => json!({ "name": name }),
        };
        self.audit_result("register_new_patient", details, &result);
        result
    }

    fn try_register_patient(
        &mut self,
        request: RegisterPatientRequest,
    ) -> Result<RegisteredPatient, ClinicalError> {
        if !validation::is_valid_phone(&request.phone) {
            return Err(ClinicalError::validation("Invalid phone number format"));
        }
        if !validation::is_valid_email(&request.email) {
            return Err(ClinicalError::validation("Invalid email format"));
        }
        let date_of_birth = validation::parse_date(&request.date_of_birth).ok_or_else(|| {
            ClinicalError::validation("Invalid date of birth format (use YYYY-MM-DD)")
        })?;

        if let Some(existing) = self.patients.iter().find(|p| {
            p.first_name.eq_ignore_ascii_case(request.first_name.trim())
                && p.last_name.eq_ignore_ascii_case(request.last_name.trim())
                && p.date_of_birth == date_of_birth
        }) {
            return Err(ClinicalError::Duplicate {
                existing_patient_id: existing.patient_id.clone(),
            });
        }

        let patient_id = format!("PT{:06}", self.next_patient_seq);
        self.next_patient_seq += 1;

        let patient = Patient {
            patient_id: patient_id.clone(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            date_of_birth,
            gender: request.gender,
            phone: request.phone,
            email: request.email,
            address: request.address,
            insurance: request.insurance,
            insurance_id: request.insurance_id,
            emergency_contact: request.emergency_contact,
            allergies: Vec::new(),
            chronic_conditions: Vec::new(),
            last_visit: None,
            registered_date: Some(self.now()),
        };

        debug!("Registered patient {}", patient_id);
        self.patients.push(patient);

        Ok(RegisteredPatient {
            message: format!("Patient registered successfully. ID: {}", patient_id),
            patient_id,
        })
    }

    // ==============================================================================
    // DOCTORS
    // ==============================================================================

    pub fn search_doctors(&mut self, query: &DoctorSearchQuery) -> Vec<Doctor> {
        let results: Vec<Doctor> = self
            .doctors
            .iter()
            .filter(|d| doctor_matches(d, query))
            .cloned()
            .collect();

        self.record_audit(
            "search_doctors",
            json!({
                "criteria": query,
                "results_count": results.len(),
            }),
            true,
        );

        results
    }

    // ==============================================================================
    // MEDICAL HISTORY
    // ==============================================================================

    pub fn get_medical_history(&mut self, patient_id: &str) -> Result<MedicalHistory, ClinicalError> {
        let result = self.build_medical_history(patient_id);
        self.audit_result("get_medical_history", json!({ "patient_id": patient_id }), &result);
        result
    }

    fn build_medical_history(&self, patient_id: &str) -> Result<MedicalHistory, ClinicalError> {
        let patient = self
            .find_patient(patient_id)
            .ok_or_else(|| ClinicalError::not_found(Entity::Patient, patient_id))?;

        let mut records: Vec<MedicalRecord> = self
            .medical_records
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));

        let mut appointments: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect();
        appointments.sort_by(|a, b| a.appointment_time.cmp(&b.appointment_time));

        let count_status = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };
        let total_visits = count_status(AppointmentStatus::Completed);
        let upcoming_appointments = count_status(AppointmentStatus::Scheduled);
        let cancelled_appointments = count_status(AppointmentStatus::Cancelled);

        // Earliest five, not the latest five: callers rely on this ordering.
        appointments.truncate(5);

        Ok(MedicalHistory {
            patient_id: patient.patient_id.clone(),
            patient_name: patient.full_name(),
            date_of_birth: patient.date_of_birth,
            gender: patient.gender.clone(),
            allergies: patient.allergies.clone(),
            chronic_conditions: patient.chronic_conditions.clone(),
            last_visit: patient.last_visit,
            total_visits,
            upcoming_appointments,
            cancelled_appointments,
            medical_records: records,
            recent_appointments: appointments,
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::seeded()
    }
}

/// True when `filter` is absent or blank.
fn is_wildcard(filter: &Option<String>) -> bool {
    filter.as_deref().map_or(true, |f| f.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn patient_matches(patient: &Patient, query: &PatientSearchQuery) -> bool {
    if !is_wildcard(&query.patient_id)
        && query.patient_id.as_deref().map(str::trim) != Some(patient.patient_id.as_str())
    {
        return false;
    }
    if let Some(first_name) = query.first_name.as_deref().filter(|f| !f.trim().is_empty()) {
        if !contains_ignore_case(&patient.first_name, first_name) {
            return false;
        }
    }
    if let Some(last_name) = query.last_name.as_deref().filter(|f| !f.trim().is_empty()) {
        if !contains_ignore_case(&patient.last_name, last_name) {
            return false;
        }
    }
    if let Some(dob) = query.date_of_birth.as_deref().filter(|f| !f.trim().is_empty()) {
        if patient.date_of_birth.format("%Y-%m-%d").to_string() != dob.trim() {
            return false;
        }
    }
    if let Some(phone) = query.phone.as_deref().filter(|f| !f.trim().is_empty()) {
        if !digits_only(&patient.phone).contains(&digits_only(phone)) {
            return false;
        }
    }
    true
}

fn doctor_matches(doctor: &Doctor, query: &DoctorSearchQuery) -> bool {
    if let Some(specialty) = query.specialty.as_deref().filter(|f| !f.trim().is_empty()) {
        if !contains_ignore_case(&doctor.specialty, specialty) {
            return false;
        }
    }
    if !is_wildcard(&query.doctor_id)
        && query.doctor_id.as_deref().map(str::trim) != Some(doctor.doctor_id.as_str())
    {
        return false;
    }
    if let Some(day) = query.available_day.as_deref().filter(|f| !f.trim().is_empty()) {
        if !doctor.available_days.iter().any(|d| contains_ignore_case(d, day)) {
            return false;
        }
    }
    true
}

/// Next free numeric suffix for identifiers of the form `<prefix><digits>`.
fn next_sequence<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u32 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|digits| digits.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max + 1)
}
