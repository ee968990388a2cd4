// libs/agent-cell/src/services/intent.rs
//
// Keyword routing from free text to a registry operation. Rules are tried in
// order and the first one that matches decides the intent.

use std::sync::LazyLock;

use regex::Regex;

static PATIENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bP[T-]?\d+\b").expect("valid patient id regex"));

static MEDICATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(aspirin|ibuprofen|acetaminophen|warfarin|metformin|lisinopril|potassium|alcohol)\b",
    )
    .expect("valid medication regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    PatientHistory { patient_id: String },
    InteractionCheck { medications: [String; 2] },
    PatientList,
    Fallback,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::PatientHistory { .. } => "patient_history",
            Intent::InteractionCheck { .. } => "interaction_check",
            Intent::PatientList => "patient_list",
            Intent::Fallback => "fallback",
        }
    }
}

type Rule = fn(&str) -> Option<Intent>;

const RULES: &[Rule] = &[patient_lookup, interaction_check, patient_list];

/// Maps `text` to an intent. Pure; never touches the registry.
pub fn classify(text: &str) -> Intent {
    RULES
        .iter()
        .find_map(|rule| rule(text))
        .unwrap_or(Intent::Fallback)
}

/// Known demo patients recognised by name. A name match overrides any
/// identifier found in the same text.
fn alias_patient_id(lower: &str) -> Option<&'static str> {
    if lower.contains("john") && lower.contains("doe") {
        Some("PT000001")
    } else if lower.contains("maria") || lower.contains("garcia") {
        Some("PT000002")
    } else if lower.contains("robert") || lower.contains("johnson") {
        Some("PT000003")
    } else {
        None
    }
}

fn patient_lookup(text: &str) -> Option<Intent> {
    let explicit = PATIENT_ID_REGEX
        .find(text)
        .map(|found| found.as_str().to_uppercase());
    let patient_id = alias_patient_id(&text.to_lowercase())
        .map(str::to_string)
        .or(explicit)?;
    Some(Intent::PatientHistory { patient_id })
}

fn interaction_check(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();
    if !lower.contains("interaction") && !lower.contains("drug") {
        return None;
    }

    let mut medications: Vec<String> = Vec::new();
    for found in MEDICATION_REGEX.find_iter(text) {
        let name = capitalize(found.as_str());
        if !medications.contains(&name) {
            medications.push(name);
        }
    }

    match medications.as_slice() {
        [first, second, ..] => Some(Intent::InteractionCheck {
            medications: [first.clone(), second.clone()],
        }),
        _ => None,
    }
}

fn patient_list(text: &str) -> Option<Intent> {
    let lower = text.to_lowercase();
    ["search", "find", "list", "show"]
        .iter()
        .any(|keyword| lower.contains(keyword))
        .then_some(Intent::PatientList)
}

/// "wARFARIN" -> "Warfarin"
fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
