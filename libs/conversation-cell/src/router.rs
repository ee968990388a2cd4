// libs/conversation-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::actions::ActionLogStore;

pub fn action_routes(store: Arc<ActionLogStore>) -> Router {
    Router::new()
        .route("/agent/actions", post(handlers::record_action))
        .route("/agent/actions/{patient_id}", get(handlers::list_actions))
        .route("/dashboard/summary", get(handlers::dashboard_summary))
        .with_state(store)
}
