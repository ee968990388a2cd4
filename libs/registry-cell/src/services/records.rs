use serde_json::json;
use tracing::debug;

use crate::error::{ClinicalError, Entity};
use crate::models::{AddMedicalRecordRequest, MedicalRecord, RecordCreated};
use crate::services::registry::Registry;

impl Registry {
    /// Appends a medical record. Records are never edited or removed.
    pub fn add_medical_record(
        &mut self,
        patient_id: &str,
        request: AddMedicalRecordRequest,
    ) -> Result<RecordCreated, ClinicalError> {
        let diagnosis = request.diagnosis.clone();
        let result = self.try_add_medical_record(patient_id, request);
        let details = match &result {
            Ok(created) => json!({
                "record_id": created.record_id,
                "patient_id": patient_id,
                "diagnosis": diagnosis,
            }),
            Err(_) => json!({ "patient_id": patient_id, "diagnosis": diagnosis }),
        };
        self.audit_result("add_medical_record", details, &result);
        result
    }

    fn try_add_medical_record(
        &mut self,
        patient_id: &str,
        request: AddMedicalRecordRequest,
    ) -> Result<RecordCreated, ClinicalError> {
        if self.find_patient(patient_id).is_none() {
            return Err(ClinicalError::not_found(Entity::Patient, patient_id));
        }

        if let Some(appointment_id) = request.appointment_id.as_deref() {
            if !self
                .appointments
                .iter()
                .any(|a| a.appointment_id == appointment_id)
            {
                return Err(ClinicalError::not_found(Entity::Appointment, appointment_id));
            }
        }

        if request.diagnosis.trim().is_empty() {
            return Err(ClinicalError::validation(
                "Diagnosis is required for medical records",
            ));
        }

        let record_id = format!("MR{:06}", self.next_record_seq);
        self.next_record_seq += 1;
        let now = self.now();

        self.medical_records.push(MedicalRecord {
            record_id: record_id.clone(),
            patient_id: patient_id.to_string(),
            appointment_id: request.appointment_id,
            date: now,
            diagnosis: request.diagnosis,
            symptoms: request.symptoms,
            prescribed_medications: request.prescribed_medications,
            notes: request.notes,
            follow_up_required: request.follow_up_required,
            follow_up_date: request.follow_up_date,
            created_by: "system".to_string(),
        });

        if let Some(patient) = self.find_patient_mut(patient_id) {
            patient.last_visit = Some(now.date());
        }

        debug!("Medical record {} created for {}", record_id, patient_id);

        Ok(RecordCreated {
            record_id,
            message: "Medical record created successfully".to_string(),
        })
    }
}
