// libs/registry-cell/src/services/scheduler.rs
//
// Appointment booking: a short-circuiting validation chain in front of an
// append to the registry's appointment list.

use chrono::{Duration, NaiveDateTime};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{ClinicalError, Entity};
use crate::models::{
    Appointment, AppointmentDetails, AppointmentSearchQuery, AppointmentStatus,
    CancelledAppointment, ScheduleAppointmentRequest, ScheduledAppointment,
    APPOINTMENT_DURATION_MINUTES,
};
use crate::services::registry::Registry;
use crate::services::validation;

impl Registry {
    pub fn schedule_appointment(
        &mut self,
        request: ScheduleAppointmentRequest,
    ) -> Result<ScheduledAppointment, ClinicalError> {
        let result = self.try_schedule_appointment(&request);
        let details = match &result {
            Ok(scheduled) => json!({
                "appointment_id": scheduled.appointment_id,
                "patient_id": request.patient_id,
                "doctor_id": request.doctor_id,
            }),
            Err(_) => json!({
                "patient_id": request.patient_id,
                "doctor_id": request.doctor_id,
                "requested": format!("{} {}", request.appointment_date, request.appointment_time),
            }),
        };
        self.audit_result("schedule_appointment", details, &result);
        result
    }

    fn try_schedule_appointment(
        &mut self,
        request: &ScheduleAppointmentRequest,
    ) -> Result<ScheduledAppointment, ClinicalError> {
        debug!(
            "Scheduling appointment for patient {} with doctor {}",
            request.patient_id, request.doctor_id
        );

        let patient = self
            .find_patient(&request.patient_id)
            .ok_or_else(|| ClinicalError::not_found(Entity::Patient, &request.patient_id))?
            .clone();

        let doctor = self
            .find_doctor(&request.doctor_id)
            .ok_or_else(|| ClinicalError::not_found(Entity::Doctor, &request.doctor_id))?
            .clone();

        let start = validation::parse_appointment_datetime(
            &request.appointment_date,
            &request.appointment_time,
        )
        .ok_or_else(|| ClinicalError::validation("Invalid date/time format"))?;

        if start <= self.now() {
            return Err(ClinicalError::validation(
                "Appointment must be scheduled in the future",
            ));
        }

        let day_name = start.format("%A").to_string();
        if !doctor.is_available_on(&day_name) {
            return Err(ClinicalError::DoctorUnavailable {
                day: day_name,
                available_days: doctor.available_days.clone(),
            });
        }

        let end = start
            .checked_add_signed(Duration::minutes(APPOINTMENT_DURATION_MINUTES))
            .ok_or_else(|| ClinicalError::validation("Invalid date/time format"))?;

        if let Some(conflict) = self.find_conflict(&doctor.doctor_id, start, end) {
            warn!(
                "Conflict detected for doctor {} at {} with {}",
                doctor.doctor_id, start, conflict.appointment_id
            );
            return Err(ClinicalError::Conflict {
                conflicting_appointment: conflict.appointment_id.clone(),
            });
        }

        let appointment_id = format!("APT{:06}", self.next_appointment_seq);
        self.next_appointment_seq += 1;

        let appointment = Appointment {
            appointment_id: appointment_id.clone(),
            patient_id: patient.patient_id.clone(),
            patient_name: patient.full_name(),
            doctor_id: doctor.doctor_id.clone(),
            doctor_name: doctor.name.clone(),
            appointment_time: start,
            duration_minutes: APPOINTMENT_DURATION_MINUTES,
            reason: request.reason.clone(),
            appointment_type: request.appointment_type.clone(),
            status: AppointmentStatus::Scheduled,
            consultation_fee: doctor.consultation_fee,
            created_at: self.now(),
            cancellation_reason: None,
            cancelled_at: None,
        };
        self.appointments.push(appointment);

        Ok(ScheduledAppointment {
            details: AppointmentDetails {
                patient: patient.full_name(),
                doctor: doctor.name,
                specialty: doctor.specialty,
                date_time: start.format("%B %d, %Y at %I:%M %p").to_string(),
                reason: request.reason.clone(),
                fee: format!("${}", doctor.consultation_fee),
            },
            message: format!("Appointment scheduled successfully. ID: {}", appointment_id),
            appointment_id,
        })
    }

    /// First active appointment of `doctor_id` overlapping `[start, end)`.
    fn find_conflict(
        &self,
        doctor_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<&Appointment> {
        self.appointments.iter().find(|existing| {
            existing.doctor_id == doctor_id
                && existing.is_active()
                && existing.end_time().is_some_and(|existing_end| {
                    appointments_overlap(start, end, existing.appointment_time, existing_end)
                })
        })
    }

    /// Marks the appointment cancelled. Cancelling twice succeeds again and
    /// overwrites the reason and timestamp.
    pub fn cancel_appointment(
        &mut self,
        appointment_id: &str,
        reason: Option<String>,
    ) -> Result<CancelledAppointment, ClinicalError> {
        let now = self.now();
        let result = match self
            .appointments
            .iter_mut()
            .find(|a| a.appointment_id == appointment_id)
        {
            Some(appointment) => {
                appointment.status = AppointmentStatus::Cancelled;
                appointment.cancellation_reason = reason.clone();
                appointment.cancelled_at = Some(now);
                Ok(CancelledAppointment {
                    appointment_id: appointment_id.to_string(),
                    message: "Appointment cancelled successfully".to_string(),
                })
            }
            None => Err(ClinicalError::not_found(Entity::Appointment, appointment_id)),
        };

        self.audit_result(
            "cancel_appointment",
            json!({ "appointment_id": appointment_id, "reason": reason }),
            &result,
        );
        result
    }

    pub fn complete_appointment(&mut self, appointment_id: &str) -> Result<Appointment, ClinicalError> {
        let result = self.try_complete_appointment(appointment_id);
        self.audit_result(
            "complete_appointment",
            json!({ "appointment_id": appointment_id }),
            &result,
        );
        result
    }

    fn try_complete_appointment(&mut self, appointment_id: &str) -> Result<Appointment, ClinicalError> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.appointment_id == appointment_id)
            .ok_or_else(|| ClinicalError::not_found(Entity::Appointment, appointment_id))?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(ClinicalError::validation(
                "Cancelled appointments cannot be completed",
            ));
        }

        appointment.status = AppointmentStatus::Completed;
        let completed = appointment.clone();

        if let Some(patient) = self.find_patient_mut(&completed.patient_id) {
            patient.last_visit = Some(completed.appointment_time.date());
        }

        Ok(completed)
    }

    /// Appointments matching every supplied filter, sorted by time.
    pub fn get_appointments(&mut self, query: &AppointmentSearchQuery) -> Vec<Appointment> {
        let mut results: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| non_blank(&query.patient_id).map_or(true, |id| a.patient_id == id))
            .filter(|a| non_blank(&query.doctor_id).map_or(true, |id| a.doctor_id == id))
            .filter(|a| {
                non_blank(&query.date).map_or(true, |date| {
                    a.appointment_time.format("%Y-%m-%d").to_string().starts_with(date)
                })
            })
            .filter(|a| query.status.map_or(true, |status| a.status == status))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.appointment_time.cmp(&b.appointment_time));

        self.record_audit(
            "get_appointments",
            json!({ "criteria": query, "results_count": results.len() }),
            true,
        );

        results
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Half-open intervals overlap when each starts before the other ends.
pub fn appointments_overlap(
    start1: NaiveDateTime,
    end1: NaiveDateTime,
    start2: NaiveDateTime,
    end2: NaiveDateTime,
) -> bool {
    start1 < end2 && start2 < end1
}
