// libs/agent-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::services::intent::Intent;

/// What the agent did with a piece of text and the text it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub intent: Intent,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentQueryRequest {
    pub patient_id: String,
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentQueryResponse {
    pub status: String,
    pub patient_id: String,
    pub query: String,
    pub response: String,
    pub timestamp: NaiveDateTime,
}
