//! Demo patients and doctors the registry starts with.

use chrono::NaiveDate;

use crate::models::{Doctor, Patient};

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

struct PatientSeed {
    patient_id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    date_of_birth: (i32, u32, u32),
    gender: &'static str,
    phone: &'static str,
    email: &'static str,
    address: &'static str,
    insurance: &'static str,
    insurance_id: &'static str,
    emergency_contact: &'static str,
    allergies: &'static [&'static str],
    chronic_conditions: &'static [&'static str],
    last_visit: (i32, u32, u32),
}

const PATIENTS: &[PatientSeed] = &[
    PatientSeed {
        patient_id: "PT000001",
        first_name: "John",
        last_name: "Smith",
        date_of_birth: (1985, 3, 15),
        gender: "Male",
        phone: "555-0101",
        email: "john.smith@email.com",
        address: "123 Main St, City, ST 12345",
        insurance: "BlueCross",
        insurance_id: "BC123456",
        emergency_contact: "Jane Smith - 555-0102",
        allergies: &["Penicillin"],
        chronic_conditions: &[],
        last_visit: (2025, 12, 10),
    },
    PatientSeed {
        patient_id: "PT000002",
        first_name: "Maria",
        last_name: "Garcia",
        date_of_birth: (1990, 7, 22),
        gender: "Female",
        phone: "555-0201",
        email: "maria.garcia@email.com",
        address: "456 Oak Ave, City, ST 12345",
        insurance: "Aetna",
        insurance_id: "AE789012",
        emergency_contact: "Carlos Garcia - 555-0202",
        allergies: &[],
        chronic_conditions: &["Type 2 Diabetes"],
        last_visit: (2026, 1, 15),
    },
    PatientSeed {
        patient_id: "PT000003",
        first_name: "Robert",
        last_name: "Johnson",
        date_of_birth: (1978, 11, 30),
        gender: "Male",
        phone: "555-0301",
        email: "robert.j@email.com",
        address: "789 Pine Rd, City, ST 12345",
        insurance: "UnitedHealth",
        insurance_id: "UH345678",
        emergency_contact: "Lisa Johnson - 555-0302",
        allergies: &["Sulfa drugs", "Latex"],
        chronic_conditions: &["Hypertension"],
        last_visit: (2025, 11, 20),
    },
];

pub fn patients() -> Vec<Patient> {
    PATIENTS
        .iter()
        .filter_map(|seed| {
            let (y, m, d) = seed.date_of_birth;
            let (vy, vm, vd) = seed.last_visit;
            Some(Patient {
                patient_id: seed.patient_id.to_string(),
                first_name: seed.first_name.to_string(),
                last_name: seed.last_name.to_string(),
                date_of_birth: date(y, m, d)?,
                gender: seed.gender.to_string(),
                phone: seed.phone.to_string(),
                email: seed.email.to_string(),
                address: seed.address.to_string(),
                insurance: Some(seed.insurance.to_string()),
                insurance_id: Some(seed.insurance_id.to_string()),
                emergency_contact: Some(seed.emergency_contact.to_string()),
                allergies: strings(seed.allergies),
                chronic_conditions: strings(seed.chronic_conditions),
                last_visit: date(vy, vm, vd),
                registered_date: None,
            })
        })
        .collect()
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            doctor_id: "DR001".to_string(),
            name: "Dr. Sarah Williams".to_string(),
            specialty: "Family Medicine".to_string(),
            license_number: "MD123456".to_string(),
            phone: "555-1001".to_string(),
            email: "s.williams@clinic.com".to_string(),
            available_days: strings(&["Monday", "Tuesday", "Wednesday", "Friday"]),
            consultation_fee: 150,
        },
        Doctor {
            doctor_id: "DR002".to_string(),
            name: "Dr. Michael Chen".to_string(),
            specialty: "Cardiology".to_string(),
            license_number: "MD234567".to_string(),
            phone: "555-1002".to_string(),
            email: "m.chen@clinic.com".to_string(),
            available_days: strings(&["Tuesday", "Wednesday", "Thursday"]),
            consultation_fee: 250,
        },
        Doctor {
            doctor_id: "DR003".to_string(),
            name: "Dr. Emily Rodriguez".to_string(),
            specialty: "Pediatrics".to_string(),
            license_number: "MD345678".to_string(),
            phone: "555-1003".to_string(),
            email: "e.rodriguez@clinic.com".to_string(),
            available_days: strings(&["Monday", "Wednesday", "Thursday", "Friday"]),
            consultation_fee: 175,
        },
    ]
}
