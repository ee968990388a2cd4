// libs/registry-cell/tests/scheduler_test.rs
//
// Booking, cancellation and history against a registry pinned to
// Wednesday 2030-01-02 08:00.

use assert_matches::assert_matches;
use chrono::{NaiveDate, Weekday};
use std::sync::Arc;

use registry_cell::models::*;
use registry_cell::{ClinicalError, Entity, Registry};
use shared_utils::test_utils::{next_weekday, test_now};

fn registry() -> Registry {
    Registry::seeded().with_clock(Arc::new(test_now))
}

fn next(weekday: Weekday) -> NaiveDate {
    next_weekday(test_now().date(), weekday)
}

fn booking(patient_id: &str, doctor_id: &str, date: NaiveDate, time: &str) -> ScheduleAppointmentRequest {
    ScheduleAppointmentRequest {
        patient_id: patient_id.to_string(),
        doctor_id: doctor_id.to_string(),
        appointment_date: date.format("%Y-%m-%d").to_string(),
        appointment_time: time.to_string(),
        reason: "Annual checkup".to_string(),
        appointment_type: "Consultation".to_string(),
    }
}

#[test]
fn schedules_on_an_available_day() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    let scheduled = registry
        .schedule_appointment(booking("PT000001", "DR001", monday, "10:00"))
        .expect("slot is free");

    assert_eq!(scheduled.appointment_id, "APT000001");
    assert_eq!(scheduled.details.patient, "John Smith");
    assert_eq!(scheduled.details.doctor, "Dr. Sarah Williams");
    assert_eq!(scheduled.details.fee, "$150");
    assert_eq!(scheduled.details.date_time, "January 07, 2030 at 10:00 AM");

    let stored = &registry.appointments()[0];
    assert_eq!(stored.status, AppointmentStatus::Scheduled);
    assert_eq!(stored.duration_minutes, APPOINTMENT_DURATION_MINUTES);
    assert_eq!(stored.created_at, test_now());
}

#[test]
fn accepts_combined_timestamp_in_date_field() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    let mut request = booking("PT000001", "DR001", monday, "");
    request.appointment_date = format!("{}T14:30", monday.format("%Y-%m-%d"));

    let scheduled = registry.schedule_appointment(request).expect("valid timestamp");
    assert_eq!(scheduled.details.date_time, "January 07, 2030 at 02:30 PM");
}

#[test]
fn unavailable_day_lists_the_doctors_days() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    let err = registry
        .schedule_appointment(booking("PT000001", "DR002", monday, "10:00"))
        .unwrap_err();

    assert_matches!(
        err,
        ClinicalError::DoctorUnavailable { ref day, ref available_days }
            if day == "Monday" && available_days == &["Tuesday", "Wednesday", "Thursday"]
    );
    assert!(registry.appointments().is_empty());
}

#[test]
fn overlapping_booking_cites_the_existing_appointment() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    registry
        .schedule_appointment(booking("PT000001", "DR001", monday, "10:00"))
        .expect("first booking");

    let err = registry
        .schedule_appointment(booking("PT000002", "DR001", monday, "10:15"))
        .unwrap_err();

    assert_matches!(
        err,
        ClinicalError::Conflict { ref conflicting_appointment } if conflicting_appointment == "APT000001"
    );
    assert_eq!(registry.appointments().len(), 1);
}

#[test]
fn back_to_back_and_other_doctor_bookings_do_not_conflict() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    registry
        .schedule_appointment(booking("PT000001", "DR001", monday, "10:00"))
        .expect("first booking");
    registry
        .schedule_appointment(booking("PT000002", "DR001", monday, "10:30"))
        .expect("starts when the first ends");
    registry
        .schedule_appointment(booking("PT000003", "DR003", monday, "10:00"))
        .expect("different doctor");

    assert_eq!(registry.appointments().len(), 3);
}

#[test]
fn cancelled_appointment_releases_its_slot() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    let first = registry
        .schedule_appointment(booking("PT000001", "DR001", monday, "10:00"))
        .expect("first booking");
    registry
        .cancel_appointment(&first.appointment_id, Some("Feeling better".to_string()))
        .expect("cancel");

    let rebooked = registry
        .schedule_appointment(booking("PT000002", "DR001", monday, "10:00"))
        .expect("slot released");
    assert_eq!(rebooked.appointment_id, "APT000002");
}

#[test]
fn rejects_past_and_malformed_times() {
    let mut registry = registry();

    let past = NaiveDate::from_ymd_opt(2029, 12, 31).expect("valid date");
    assert_matches!(
        registry.schedule_appointment(booking("PT000001", "DR001", past, "10:00")),
        Err(ClinicalError::Validation(ref msg)) if msg.contains("future")
    );

    let monday = next(Weekday::Mon);
    assert_matches!(
        registry.schedule_appointment(booking("PT000001", "DR001", monday, "ten o'clock")),
        Err(ClinicalError::Validation(ref msg)) if msg == "Invalid date/time format"
    );
}

#[test]
fn slot_ending_past_the_last_date_is_rejected() {
    let mut registry = registry();

    assert_matches!(
        registry.schedule_appointment(booking("PT000001", "DR001", NaiveDate::MAX, "23:45")),
        Err(ClinicalError::Validation(ref msg)) if msg == "Invalid date/time format"
    );
    assert!(registry.appointments().is_empty());
}

#[test]
fn unknown_patient_is_reported_before_unknown_doctor() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    assert_matches!(
        registry.schedule_appointment(booking("PT999999", "DR999", monday, "10:00")),
        Err(ClinicalError::NotFound { entity: Entity::Patient, .. })
    );
    assert_matches!(
        registry.schedule_appointment(booking("PT000001", "DR999", monday, "10:00")),
        Err(ClinicalError::NotFound { entity: Entity::Doctor, .. })
    );
}

#[test]
fn cancelling_twice_overwrites_the_reason() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    let scheduled = registry
        .schedule_appointment(booking("PT000001", "DR001", monday, "10:00"))
        .expect("booking");

    registry
        .cancel_appointment(&scheduled.appointment_id, Some("First".to_string()))
        .expect("first cancel");
    registry
        .cancel_appointment(&scheduled.appointment_id, Some("Second".to_string()))
        .expect("second cancel");

    let stored = &registry.appointments()[0];
    assert_eq!(stored.status, AppointmentStatus::Cancelled);
    assert_eq!(stored.cancellation_reason.as_deref(), Some("Second"));

    assert_matches!(
        registry.cancel_appointment("APT999999", None),
        Err(ClinicalError::NotFound { entity: Entity::Appointment, .. })
    );
}

#[test]
fn completing_updates_last_visit_and_rejects_cancelled() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);
    let friday = next(Weekday::Fri);

    let kept = registry
        .schedule_appointment(booking("PT000002", "DR001", monday, "09:00"))
        .expect("booking");
    let dropped = registry
        .schedule_appointment(booking("PT000002", "DR001", friday, "09:00"))
        .expect("booking");

    let completed = registry
        .complete_appointment(&kept.appointment_id)
        .expect("complete");
    assert_eq!(completed.status, AppointmentStatus::Completed);
    assert_eq!(
        registry.get_patient("PT000002").expect("patient").last_visit,
        Some(monday)
    );

    registry
        .cancel_appointment(&dropped.appointment_id, None)
        .expect("cancel");
    assert_matches!(
        registry.complete_appointment(&dropped.appointment_id),
        Err(ClinicalError::Validation(_))
    );
}

#[test]
fn appointment_listing_filters_and_sorts() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);
    let tuesday = next(Weekday::Tue);

    registry
        .schedule_appointment(booking("PT000001", "DR001", tuesday, "09:00"))
        .expect("booking");
    registry
        .schedule_appointment(booking("PT000001", "DR001", monday, "15:00"))
        .expect("booking");
    registry
        .schedule_appointment(booking("PT000002", "DR003", monday, "09:00"))
        .expect("booking");

    let for_john = registry.get_appointments(&AppointmentSearchQuery {
        patient_id: Some("PT000001".to_string()),
        ..Default::default()
    });
    let ids: Vec<&str> = for_john.iter().map(|a| a.appointment_id.as_str()).collect();
    assert_eq!(ids, vec!["APT000002", "APT000001"]);

    let on_monday = registry.get_appointments(&AppointmentSearchQuery {
        date: Some(monday.format("%Y-%m-%d").to_string()),
        ..Default::default()
    });
    assert_eq!(on_monday.len(), 2);
}

// ==============================================================================
// MEDICAL HISTORY & RECORDS
// ==============================================================================

#[test]
fn history_keeps_the_first_five_appointments_and_counts_all() {
    let mut registry = registry();
    let monday = next(Weekday::Mon);

    for hour in 9..16 {
        registry
            .schedule_appointment(booking("PT000003", "DR001", monday, &format!("{:02}:00", hour)))
            .expect("booking");
    }
    registry
        .cancel_appointment("APT000007", None)
        .expect("cancel");
    registry
        .complete_appointment("APT000001")
        .expect("complete");

    let history = registry.get_medical_history("PT000003").expect("history");

    assert_eq!(history.patient_name, "Robert Johnson");
    assert_eq!(history.total_visits, 1);
    assert_eq!(history.upcoming_appointments, 5);
    assert_eq!(history.cancelled_appointments, 1);
    assert_eq!(history.recent_appointments.len(), 5);
    assert_eq!(history.recent_appointments[0].appointment_id, "APT000001");
    assert_eq!(history.recent_appointments[4].appointment_id, "APT000005");
}

#[test]
fn records_are_listed_newest_first() {
    let mut registry = registry();

    let first = registry
        .add_medical_record(
            "PT000001",
            AddMedicalRecordRequest {
                diagnosis: "Seasonal allergies".to_string(),
                symptoms: vec!["Sneezing".to_string()],
                ..Default::default()
            },
        )
        .expect("record");
    assert_eq!(first.record_id, "MR000001");

    let later = test_now() + chrono::Duration::days(3);
    let mut registry = registry.with_clock(Arc::new(move || later));
    registry
        .add_medical_record(
            "PT000001",
            AddMedicalRecordRequest {
                diagnosis: "Sinusitis".to_string(),
                prescribed_medications: vec![Prescription {
                    name: "Amoxicillin".to_string(),
                    dosage: Some("500mg".to_string()),
                    frequency: None,
                }],
                ..Default::default()
            },
        )
        .expect("record");

    let history = registry.get_medical_history("PT000001").expect("history");
    assert_eq!(history.medical_records.len(), 2);
    assert_eq!(history.medical_records[0].diagnosis, "Sinusitis");
    assert_eq!(history.last_visit, Some(later.date()));
}

#[test]
fn record_requires_diagnosis_and_known_appointment() {
    let mut registry = registry();

    assert_matches!(
        registry.add_medical_record("PT000001", AddMedicalRecordRequest::default()),
        Err(ClinicalError::Validation(_))
    );
    assert_matches!(
        registry.add_medical_record(
            "PT000001",
            AddMedicalRecordRequest {
                appointment_id: Some("APT999999".to_string()),
                diagnosis: "Flu".to_string(),
                ..Default::default()
            },
        ),
        Err(ClinicalError::NotFound { entity: Entity::Appointment, .. })
    );
    assert_matches!(
        registry.add_medical_record("PT999999", AddMedicalRecordRequest::default()),
        Err(ClinicalError::NotFound { entity: Entity::Patient, .. })
    );
    assert!(registry.medical_records().is_empty());
}
