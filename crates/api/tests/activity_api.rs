//! Integration tests for the activity feed endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, build_test_app, get_auth, post_json, put_json, token_for};
use issuetrack_core::issue::ProjectStatus;
use issuetrack_core::permissions::ROLE_DEVELOPER;
use issuetrack_db::stores::MemoryStore;
use serde_json::json;

/// Seed a project, two users and one issue reassigned from John to Jane.
/// Returns the store, project id, issue id and John's token.
async fn reassigned_issue() -> (MemoryStore, i64, i64, String) {
    let store = MemoryStore::new();
    let project = store.insert_project("Tracker", ProjectStatus::Open.id()).await;
    let jane = store.insert_user("Jane", "Doe", ROLE_DEVELOPER).await;
    let john = store.insert_user("John", "Smith", ROLE_DEVELOPER).await;
    let token = token_for(john.id, ROLE_DEVELOPER);

    let created = post_json(
        build_test_app(store.clone()),
        &format!("/api/v1/projects/{}/issues", project.id),
        &token,
        json!({ "title": "Bug", "body": "It broke" }),
    )
    .await;
    let issue_id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(store.clone()),
        &format!("/api/v1/projects/{}/issues/{issue_id}/assignee", project.id),
        &token,
        json!({ "assigned_to": jane.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    (store, project.id, issue_id, token)
}

#[tokio::test]
async fn lists_issue_activity_in_order() {
    let (store, project_id, issue_id, token) = reassigned_issue().await;

    let response = get_auth(
        build_test_app(store),
        &format!("/api/v1/projects/{project_id}/issues/{issue_id}/activity"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action_type"], 1);
    assert_eq!(entries[1]["action_type"], 5);
}

#[tokio::test]
async fn renders_reassign_entry_as_html() {
    let (store, project_id, issue_id, token) = reassigned_issue().await;
    let entry = store
        .activity_entries()
        .await
        .into_iter()
        .find(|e| e.action_type == 5)
        .unwrap();

    let response = get_auth(
        build_test_app(store),
        &format!("/api/v1/activity/{}/reassign", entry.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains(&format!("project/{project_id}/issue/{issue_id}")));
    assert!(html.contains(">Reassigned</label>"));
    assert!(html.contains("Bug"));
    assert!(html.contains("Jane Doe"));
    assert!(html.contains("John Smith"));
    assert!(html.contains(" at "));
}

#[tokio::test]
async fn rendering_non_reassign_entry_is_rejected() {
    let (store, _, _, token) = reassigned_issue().await;
    let created = store
        .activity_entries()
        .await
        .into_iter()
        .find(|e| e.action_type == 1)
        .unwrap();

    let response = get_auth(
        build_test_app(store),
        &format!("/api/v1/activity/{}/reassign", created.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rendering_unknown_entry_returns_404() {
    let (store, _, _, token) = reassigned_issue().await;
    let response = get_auth(build_test_app(store), "/api/v1/activity/9999/reassign", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
