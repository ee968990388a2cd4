use std::sync::Arc;

use axum::{
    Json,
    Router,
    routing::get,
};
use chrono::Local;
use serde_json::{json, Value};

use agent_cell::router::agent_routes;
use agent_cell::{AgentState, ClinicalAgent, OpenAiCompletionService};
use conversation_cell::router::action_routes;
use conversation_cell::ActionLogStore;
use registry_cell::router::registry_routes;
use registry_cell::Registry;
use shared_config::AppConfig;

pub fn create_router(config: &AppConfig) -> Router {
    let registry = Registry::seeded().into_shared();
    let completion = Arc::new(OpenAiCompletionService::new(config));
    let agent_state = AgentState {
        registry: registry.clone(),
        agent: Arc::new(ClinicalAgent::new(completion)),
    };
    let actions = Arc::new(ActionLogStore::new(config.action_log_dir.clone()));

    let api = registry_routes(registry)
        .merge(agent_routes(agent_state))
        .merge(action_routes(actions));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Local::now().naive_local(),
        "service": "Clinical AI Agent API",
    }))
}
