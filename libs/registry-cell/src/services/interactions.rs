use serde_json::json;

use crate::models::{DrugInteraction, InteractionReport, Severity};
use crate::services::registry::Registry;

/// Known interacting pairs. Matching is exact and case-sensitive, in either order.
pub const KNOWN_INTERACTIONS: &[(&str, &str, &str)] = &[
    ("Warfarin", "Aspirin", "High risk: Increased bleeding"),
    ("Metformin", "Alcohol", "Moderate risk: Lactic acidosis"),
    ("Lisinopril", "Potassium", "Moderate risk: Hyperkalemia"),
];

fn lookup(first: &str, second: &str) -> Option<&'static str> {
    KNOWN_INTERACTIONS
        .iter()
        .find(|(a, b, _)| (*a == first && *b == second) || (*a == second && *b == first))
        .map(|(_, _, description)| *description)
}

/// Checks every unordered pair of `medications` against [`KNOWN_INTERACTIONS`].
pub fn find_interactions(medications: &[String]) -> Vec<DrugInteraction> {
    let mut interactions = Vec::new();

    for (i, first) in medications.iter().enumerate() {
        for second in &medications[i + 1..] {
            if let Some(description) = lookup(first, second) {
                let mut drugs = [first.clone(), second.clone()];
                drugs.sort();
                interactions.push(DrugInteraction {
                    drugs,
                    severity: Severity::from_description(description),
                    description: description.to_string(),
                });
            }
        }
    }

    interactions
}

impl Registry {
    pub fn check_drug_interactions(&mut self, medications: &[String]) -> InteractionReport {
        let interactions = find_interactions(medications);

        self.record_audit(
            "check_drug_interactions",
            json!({
                "medications": medications,
                "interactions_found": interactions.len(),
            }),
            true,
        );

        InteractionReport {
            medications_checked: medications.to_vec(),
            interactions_found: interactions.len(),
            safe: interactions.is_empty(),
            interactions,
        }
    }
}
