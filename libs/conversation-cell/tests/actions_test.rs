use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use conversation_cell::router::action_routes;
use conversation_cell::ActionLogStore;

fn store() -> (TempDir, ActionLogStore) {
    let dir = TempDir::new().unwrap();
    let store = ActionLogStore::new(dir.path().join("actions"));
    (dir, store)
}

#[test]
fn record_appends_completed_actions() {
    let (_dir, store) = store();

    store.record("PT000001", "sms", json!({ "message": "Reminder" })).unwrap();
    let call = store.record("PT000001", "call", json!({})).unwrap();

    let actions = store.list("PT000001").unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].action_type, "sms");
    assert_eq!(actions[0].details["message"], "Reminder");
    assert_eq!(actions[1], call);
    assert!(actions.iter().all(|a| a.status == "completed"));
}

#[test]
fn listing_unknown_patient_is_empty() {
    let (_dir, store) = store();
    assert!(store.list("PT000042").unwrap().is_empty());
}

#[test]
fn dashboard_counts_patients_and_actions() {
    let (_dir, store) = store();

    for i in 1..=12 {
        let patient_id = format!("PT{:06}", i);
        store.record(&patient_id, "reminder", json!({})).unwrap();
    }
    store.record("PT000001", "escalation", json!({ "level": 2 })).unwrap();

    let summary = store.dashboard_summary().unwrap();
    assert_eq!(summary.total_patients, 12);
    assert_eq!(summary.total_actions, 13);
    assert_eq!(summary.status, "operational");
    assert_eq!(summary.recent_patients.len(), 10);
    assert_eq!(summary.recent_patients[0], "PT000003");
    assert_eq!(summary.recent_patients[9], "PT000012");
}

#[test]
fn dashboard_without_directory_is_empty() {
    let (_dir, store) = store();
    let summary = store.dashboard_summary().unwrap();
    assert_eq!(summary.total_patients, 0);
    assert_eq!(summary.total_actions, 0);
    assert!(summary.recent_patients.is_empty());
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_record_and_list_actions_over_http() {
    let (_dir, store) = store();
    let app = action_routes(Arc::new(store));

    let request = Request::builder()
        .method("POST")
        .uri("/agent/actions")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "patient_id": "PT000002", "action_type": "sms", "details": { "to": "555-0201" } })
                .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "SMS action logged for PT000002");

    let request = Request::builder()
        .uri("/agent/actions/PT000002")
        .body(Body::empty())
        .unwrap();
    let body = read_json(app.clone().oneshot(request).await.unwrap()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["actions"][0]["details"]["to"], "555-0201");

    let request = Request::builder()
        .uri("/dashboard/summary")
        .body(Body::empty())
        .unwrap();
    let body = read_json(app.oneshot(request).await.unwrap()).await;
    assert_eq!(body["total_patients"], 1);
    assert_eq!(body["recent_patients"], json!(["PT000002"]));
}

#[tokio::test]
async fn test_invalid_patient_key_is_bad_request() {
    let (_dir, store) = store();
    let app = action_routes(Arc::new(store));

    let request = Request::builder()
        .method("POST")
        .uri("/agent/actions")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "patient_id": "../../etc", "action_type": "call" }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["success"], false);
}
