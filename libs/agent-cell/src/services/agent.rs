use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use registry_cell::{PatientSearchQuery, Registry};

use crate::error::AgentError;
use crate::models::AgentReply;
use crate::services::completion::{ChatMessage, CompletionService};
use crate::services::intent::{classify, Intent};

/// Executes classified intents. Registry intents run synchronously against a
/// borrowed registry; only the fallback awaits the completion service.
#[derive(Clone)]
pub struct ClinicalAgent {
    completion: Arc<dyn CompletionService>,
}

impl ClinicalAgent {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Classifies `text` and answers it. `context` is earlier conversation
    /// for the patient and only reaches the fallback prompt.
    pub async fn respond(
        &self,
        text: &str,
        registry: &mut Registry,
        context: &str,
    ) -> Result<AgentReply, AgentError> {
        let intent = classify(text);
        let output = match self.run_local(&intent, registry) {
            Some(result) => result?,
            None => self.fallback(text, context).await?,
        };
        Ok(AgentReply { intent, output })
    }

    /// Runs a registry-backed intent. `None` for [`Intent::Fallback`].
    pub fn run_local(
        &self,
        intent: &Intent,
        registry: &mut Registry,
    ) -> Option<Result<String, AgentError>> {
        debug!("Routing intent {}", intent.name());

        let output = match intent {
            Intent::PatientHistory { patient_id } => registry
                .get_medical_history(patient_id)
                .map(|history| {
                    info!("Retrieved medical history for {}", patient_id);
                    format!("Medical History for Patient {}:\n{:#}", patient_id, json!(history))
                })
                .map_err(AgentError::from),
            Intent::InteractionCheck { medications } => {
                let report = registry.check_drug_interactions(medications);
                info!("Checked interactions between {} and {}", medications[0], medications[1]);
                Ok(format!("Drug Interaction Check:\n{:#}", json!(report)))
            }
            Intent::PatientList => {
                let patients = registry.search_patients(&PatientSearchQuery::default());
                Ok(format!("Available Patients:\n{:#}", json!(patients)))
            }
            Intent::Fallback => return None,
        };

        Some(output)
    }

    /// Forwards `text` to the completion service, with `context` as a system
    /// message when there is any.
    pub async fn fallback(&self, text: &str, context: &str) -> Result<String, AgentError> {
        let mut messages = Vec::with_capacity(2);
        if !context.is_empty() {
            messages.push(ChatMessage::system(format!(
                "Recent conversation with this patient:\n{}",
                context
            )));
        }
        messages.push(ChatMessage::user(text));

        info!("No registry rule matched, using text generation");
        Ok(self.completion.complete(&messages).await?)
    }
}
