// libs/conversation-cell/src/services/actions.rs
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use tracing::info;

use crate::error::ConversationError;
use crate::models::{AgentAction, DashboardSummary};
use crate::services::storage;

const ACTIONS_SUFFIX: &str = "_actions.json";
const RECENT_PATIENTS: usize = 10;

/// Log of outreach actions (SMS, calls, escalations) taken for patients.
#[derive(Debug, Clone)]
pub struct ActionLogStore {
    dir: PathBuf,
}

impl ActionLogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record(
        &self,
        patient_id: &str,
        action_type: &str,
        details: Value,
    ) -> Result<AgentAction, ConversationError> {
        let path = storage::keyed_path(&self.dir, patient_id, ACTIONS_SUFFIX)?;
        let mut actions: Vec<AgentAction> = storage::read_array(&path)?;

        let action = AgentAction {
            patient_id: patient_id.to_string(),
            action_type: action_type.to_string(),
            details,
            timestamp: Local::now().naive_local(),
            status: "completed".to_string(),
        };
        actions.push(action.clone());
        storage::write_array(&path, &actions)?;

        info!(patient_id, action_type, "Agent action logged");
        Ok(action)
    }

    pub fn list(&self, patient_id: &str) -> Result<Vec<AgentAction>, ConversationError> {
        storage::read_array(&storage::keyed_path(&self.dir, patient_id, ACTIONS_SUFFIX)?)
    }

    pub fn dashboard_summary(&self) -> Result<DashboardSummary, ConversationError> {
        let patients = storage::list_keys(&self.dir, ACTIONS_SUFFIX)?;

        let mut total_actions = 0;
        for patient_id in &patients {
            total_actions += self.list(patient_id)?.len();
        }

        let start = patients.len().saturating_sub(RECENT_PATIENTS);
        Ok(DashboardSummary {
            total_patients: patients.len(),
            total_actions,
            timestamp: Local::now().naive_local(),
            status: "operational".to_string(),
            recent_patients: patients[start..].to_vec(),
        })
    }
}
