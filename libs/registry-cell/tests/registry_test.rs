// libs/registry-cell/tests/registry_test.rs

use assert_matches::assert_matches;
use std::sync::Arc;

use registry_cell::models::*;
use registry_cell::{ClinicalError, Entity, ErrorKind, Registry};
use shared_utils::test_utils::test_now;

fn registry() -> Registry {
    Registry::seeded().with_clock(Arc::new(test_now))
}

fn registration(first_name: &str, last_name: &str, date_of_birth: &str) -> RegisterPatientRequest {
    RegisterPatientRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth: date_of_birth.to_string(),
        gender: "Female".to_string(),
        phone: "555-123-4567".to_string(),
        email: "new.patient@email.com".to_string(),
        address: "1 Elm St".to_string(),
        insurance: None,
        insurance_id: None,
        emergency_contact: None,
    }
}

// ==============================================================================
// PATIENT SEARCH
// ==============================================================================

#[test]
fn empty_query_returns_every_patient() {
    let mut registry = registry();
    let results = registry.search_patients(&PatientSearchQuery::default());
    assert_eq!(results.len(), 3);
}

#[test]
fn search_by_last_name_is_case_insensitive_substring() {
    let mut registry = registry();
    let results = registry.search_patients(&PatientSearchQuery {
        last_name: Some("garc".to_string()),
        ..Default::default()
    });

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].patient_id, "PT000002");
}

#[test]
fn search_by_phone_ignores_punctuation() {
    let mut registry = registry();
    let results = registry.search_patients(&PatientSearchQuery {
        phone: Some("5550301".to_string()),
        ..Default::default()
    });

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].first_name, "Robert");
}

#[test]
fn combined_filters_must_all_match() {
    let mut registry = registry();
    let results = registry.search_patients(&PatientSearchQuery {
        first_name: Some("john".to_string()),
        date_of_birth: Some("1990-07-22".to_string()),
        ..Default::default()
    });

    assert!(results.is_empty());
}

// ==============================================================================
// PATIENT DETAILS
// ==============================================================================

#[test]
fn get_patient_returns_seeded_record() {
    let mut registry = registry();
    let patient = registry.get_patient("PT000003").expect("seeded patient");
    assert_eq!(patient.full_name(), "Robert Johnson");
    assert_eq!(patient.chronic_conditions, vec!["Hypertension"]);
}

#[test]
fn get_patient_rejects_malformed_id() {
    let mut registry = registry();
    let err = registry.get_patient("12345").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn get_patient_reports_unknown_id() {
    let mut registry = registry();
    let err = registry.get_patient("PT999999").unwrap_err();
    assert_matches!(err, ClinicalError::NotFound { entity: Entity::Patient, ref id } if id == "PT999999");
}

// ==============================================================================
// REGISTRATION
// ==============================================================================

#[test]
fn registration_assigns_sequential_ids() {
    let mut registry = registry();

    let first = registry
        .register_patient(registration("Alice", "Brown", "1995-05-05"))
        .expect("first registration");
    let second = registry
        .register_patient(registration("Bob", "Stone", "1980-01-01"))
        .expect("second registration");

    assert_eq!(first.patient_id, "PT000004");
    assert_eq!(second.patient_id, "PT000005");
    assert_eq!(registry.patients().len(), 5);

    let stored = registry.get_patient("PT000004").expect("registered patient");
    assert!(stored.allergies.is_empty());
    assert_eq!(stored.registered_date, Some(test_now()));
}

#[test]
fn registration_rejects_duplicate_name_and_birth_date() {
    let mut registry = registry();

    let err = registry
        .register_patient(registration("JOHN", "smith", "1985-03-15"))
        .unwrap_err();

    assert_matches!(err, ClinicalError::Duplicate { ref existing_patient_id } if existing_patient_id == "PT000001");
    assert_eq!(registry.patients().len(), 3);
}

#[test]
fn registration_validates_contact_details() {
    let mut registry = registry();

    let mut short_phone = registration("Alice", "Brown", "1995-05-05");
    short_phone.phone = "555-0101".to_string();
    assert_matches!(
        registry.register_patient(short_phone),
        Err(ClinicalError::Validation(ref msg)) if msg.contains("phone")
    );

    let mut bad_email = registration("Alice", "Brown", "1995-05-05");
    bad_email.email = "not-an-email".to_string();
    assert_matches!(
        registry.register_patient(bad_email),
        Err(ClinicalError::Validation(ref msg)) if msg.contains("email")
    );

    let bad_dob = registration("Alice", "Brown", "05/05/1995");
    assert_matches!(
        registry.register_patient(bad_dob),
        Err(ClinicalError::Validation(ref msg)) if msg.contains("date of birth")
    );

    assert_eq!(registry.patients().len(), 3);
}

// ==============================================================================
// DOCTORS
// ==============================================================================

#[test]
fn doctor_search_filters_by_specialty_and_day() {
    let mut registry = registry();

    let cardiology = registry.search_doctors(&DoctorSearchQuery {
        specialty: Some("cardio".to_string()),
        ..Default::default()
    });
    assert_eq!(cardiology.len(), 1);
    assert_eq!(cardiology[0].doctor_id, "DR002");

    let mondays = registry.search_doctors(&DoctorSearchQuery {
        available_day: Some("Monday".to_string()),
        ..Default::default()
    });
    let ids: Vec<&str> = mondays.iter().map(|d| d.doctor_id.as_str()).collect();
    assert_eq!(ids, vec!["DR001", "DR003"]);
}

// ==============================================================================
// INTERACTIONS
// ==============================================================================

#[test]
fn warfarin_and_aspirin_is_a_high_risk_interaction() {
    let mut registry = registry();
    let report = registry
        .check_drug_interactions(&["Warfarin".to_string(), "Aspirin".to_string()]);

    assert!(!report.safe);
    assert_eq!(report.interactions_found, 1);
    assert_eq!(report.interactions[0].severity, Severity::High);
    assert_eq!(report.interactions[0].description, "High risk: Increased bleeding");
}

#[test]
fn unlisted_pairs_are_safe() {
    let mut registry = registry();
    let report = registry
        .check_drug_interactions(&["Aspirin".to_string(), "Ibuprofen".to_string()]);

    assert!(report.safe);
    assert_eq!(report.interactions_found, 0);
    assert_eq!(report.medications_checked, vec!["Aspirin", "Ibuprofen"]);
}

// ==============================================================================
// AUDIT
// ==============================================================================

#[test]
fn every_operation_appends_to_the_audit_log() {
    let mut registry = registry();

    registry.search_patients(&PatientSearchQuery::default());
    let _ = registry.get_patient("PT999999");
    registry.search_doctors(&DoctorSearchQuery::default());

    let log = registry.audit_log();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].operation, "search_patients");
    assert!(log[0].success);
    assert_eq!(log[1].operation, "get_patient_details");
    assert!(!log[1].success);
    assert_eq!(log[1].details["error_kind"], "not_found");
    assert!(log.iter().all(|entry| entry.timestamp == test_now()));

    let before: Vec<_> = log.to_vec();
    registry.check_drug_interactions(&[]);
    assert_eq!(registry.audit_log().len(), 4);
    assert_eq!(&registry.audit_log()[..3], before.as_slice());
}

#[test]
fn recent_audit_entries_returns_the_tail() {
    let mut registry = registry();
    for _ in 0..4 {
        registry.search_doctors(&DoctorSearchQuery::default());
    }
    registry.search_patients(&PatientSearchQuery::default());

    let recent = registry.recent_audit_entries(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[1].operation, "search_patients");
    assert_eq!(registry.recent_audit_entries(100).len(), 5);
}
