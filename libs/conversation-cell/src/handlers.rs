use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::RecordActionRequest;
use crate::services::actions::ActionLogStore;

pub async fn record_action(
    State(store): State<Arc<ActionLogStore>>,
    Json(request): Json<RecordActionRequest>,
) -> Result<Json<Value>, AppError> {
    let action = store.record(&request.patient_id, &request.action_type, request.details)?;

    Ok(Json(json!({
        "status": "success",
        "message": format!(
            "{} action logged for {}",
            action.action_type.to_uppercase(),
            action.patient_id
        ),
        "action": action,
    })))
}

pub async fn list_actions(
    State(store): State<Arc<ActionLogStore>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let actions = store.list(&patient_id)?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "total": actions.len(),
        "actions": actions,
    })))
}

pub async fn dashboard_summary(
    State(store): State<Arc<ActionLogStore>>,
) -> Result<Json<Value>, AppError> {
    let summary = store.dashboard_summary()?;
    Ok(Json(json!(summary)))
}
