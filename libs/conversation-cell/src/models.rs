// libs/conversation-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ==============================================================================
// CONVERSATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

impl Role {
    /// Speaker label used when a transcript is replayed as prompt context.
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::Human => "Patient",
            Role::Ai => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Human => write!(f, "human"),
            Role::Ai => write!(f, "ai"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    pub patient_id: String,
    pub total_messages: usize,
    pub human_messages: usize,
    pub ai_messages: usize,
    pub last_updated: Option<NaiveDateTime>,
}

// ==============================================================================
// AGENT ACTION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentAction {
    pub patient_id: String,
    /// "sms", "call", "escalation", "reminder" or any caller-defined kind.
    pub action_type: String,
    #[serde(default)]
    pub details: Value,
    pub timestamp: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordActionRequest {
    pub patient_id: String,
    pub action_type: String,
    #[serde(default)]
    pub details: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub total_actions: usize,
    pub timestamp: NaiveDateTime,
    pub status: String,
    pub recent_patients: Vec<String>,
}
