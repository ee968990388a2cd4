use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Local;

use registry_cell::SharedRegistry;

use crate::error::AgentError;
use crate::models::{AgentQueryRequest, AgentQueryResponse};
use crate::services::agent::ClinicalAgent;
use crate::services::intent::classify;

#[derive(Clone)]
pub struct AgentState {
    pub registry: SharedRegistry,
    pub agent: Arc<ClinicalAgent>,
}

/// Answers a question about one patient. The registry lock is held only
/// while a registry rule runs, never across the text-generation call.
pub async fn agent_query(
    State(state): State<AgentState>,
    Json(request): Json<AgentQueryRequest>,
) -> Result<Json<AgentQueryResponse>, AgentError> {
    let prompt = format!("Patient {}: {}", request.patient_id, request.question);
    let intent = classify(&prompt);

    let local = {
        let mut registry = state.registry.lock().await;
        state.agent.run_local(&intent, &mut registry)
    };
    let response = match local {
        Some(result) => result?,
        None => state.agent.fallback(&prompt, "").await?,
    };

    Ok(Json(AgentQueryResponse {
        status: "success".to_string(),
        patient_id: request.patient_id,
        query: request.question,
        response,
        timestamp: Local::now().naive_local(),
    }))
}
