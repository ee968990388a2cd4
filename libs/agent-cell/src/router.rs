// libs/agent-cell/src/router.rs
use axum::{routing::post, Router};

use crate::handlers::{self, AgentState};

pub fn agent_routes(state: AgentState) -> Router {
    Router::new()
        .route("/agent/query", post(handlers::agent_query))
        .with_state(state)
}
