use std::sync::Arc;

use axum::http::StatusCode;
use eventhall_core::repository::{memory::InMemoryStore, StoreError};
use eventhall_db::mock::MockEventRepo;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{as_admin, attendee_form, booking, quiet_notifier, TestContext};

#[tokio::test]
async fn test_create_event_is_pending() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/events")
        .json(&booking("Tech Talk", "Seminar Hall", "2025-03-10", "10:00", "11:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["event"]["status"], "pending");
    assert_eq!(body["event"]["join_link"], Value::Null);
    assert_eq!(body["event"]["start"], "2025-03-10T10:00:00Z");
}

#[tokio::test]
async fn test_overlapping_request_reports_the_blocking_event() {
    let ctx = TestContext::new();
    ctx.create_event(booking("Workshop", "Seminar Hall", "2025-03-10", "10:00", "12:00"))
        .await;

    let response = ctx
        .server
        .post("/api/events")
        .json(&booking("Quiz", "Seminar Hall", "2025-03-10", "11:00", "1:00 PM"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "SCHEDULE_CONFLICT");
    assert_eq!(body["conflicting_event"]["name"], "Workshop");
    assert_eq!(body["conflicting_event"]["end"], "2025-03-10T12:00:00Z");
}

#[tokio::test]
async fn test_back_to_back_requests_both_succeed() {
    let ctx = TestContext::new();

    ctx.create_event(booking("A", "Hall 1", "2025-03-10", "10:00", "11:00"))
        .await;
    ctx.create_event(booking("B", "Hall 1", "2025-03-10", "11:00", "12:00"))
        .await;

    let pending = ctx.server.get("/api/events/pending").await.json::<Vec<Value>>();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0]["name"], "A");
}

#[tokio::test]
async fn test_missing_fields_are_a_validation_error() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/events")
        .json(&json!({ "name": "Untitled", "location": "Hall 2" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("start_date"));
}

#[tokio::test]
async fn test_non_json_body_is_a_validation_error() {
    let ctx = TestContext::new();

    let response = ctx.server.post("/api/events").text("name=Tech Talk").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_id_is_a_validation_error() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/events/not-a-uuid").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_event_details_include_attendees() {
    let ctx = TestContext::new();
    let id = ctx
        .approved_event(booking("Hackathon", "Lab 3", "2025-04-01", "09:00", "18:00"))
        .await;
    ctx.server
        .post(&format!("/api/events/join/{id}"))
        .json(&attendee_form("Asha", "asha@example.edu"))
        .await;

    let response = ctx.server.get(&format!("/api/events/{id}")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Hackathon");
    assert_eq!(body["attendees"][0]["email"], "asha@example.edu");
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/events/3f0e4a52-4b6c-4c1e-9d55-0a3c8f7e2b11")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_join_link_resolves_only_once_approved() {
    let ctx = TestContext::new();
    let pending = ctx
        .create_event(booking("Seminar", "Hall 5", "2025-05-02", "14:00", "15:00"))
        .await;
    let pending_id = pending["id"].as_str().unwrap();
    let approved_id = ctx
        .approved_event(booking("Concert", "Hall 5", "2025-05-03", "18:00", "21:00"))
        .await;

    let hidden = ctx.server.get(&format!("/api/events/join/{pending_id}")).await;
    let shown = ctx.server.get(&format!("/api/events/join/{approved_id}")).await;
    let by_id = ctx.server.get(&format!("/api/events/approved/{approved_id}")).await;

    assert_eq!(hidden.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(shown.status_code(), StatusCode::OK);
    assert_eq!(shown.json::<Value>()["name"], "Concert");
    assert_eq!(by_id.json::<Value>()["status"], "approved");
}

#[tokio::test]
async fn test_listings_by_status_and_creator() {
    let ctx = TestContext::new();
    ctx.create_event(booking("Pending One", "Hall 1", "2025-06-01", "09:00", "10:00"))
        .await;
    ctx.approved_event(booking("Approved One", "Hall 1", "2025-06-01", "10:00", "11:00"))
        .await;

    let approved = ctx.server.get("/api/events/approved").await.json::<Vec<Value>>();
    let mine = ctx
        .server
        .get("/api/events/by-creator/organizer@example.edu")
        .await
        .json::<Vec<Value>>();
    let nobody = ctx
        .server
        .get("/api/events/by-creator/nobody@example.edu")
        .await;

    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0]["name"], "Approved One");
    assert_eq!(mine.len(), 2);
    assert_eq!(nobody.status_code(), StatusCode::OK);
    assert_eq!(nobody.json::<Vec<Value>>().len(), 0);
}

#[tokio::test]
async fn test_delete_event_requires_admin() {
    let ctx = TestContext::new();
    let event = ctx
        .create_event(booking("Mixer", "Lounge", "2025-07-07", "17:00", "19:00"))
        .await;
    let path = format!("/api/events/{}", event["id"].as_str().unwrap());

    let anonymous = ctx.server.delete(&path).await;
    let admin = as_admin(ctx.server.delete(&path)).await;
    let after = ctx.server.get(&path).await;

    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(admin.status_code(), StatusCode::OK);
    assert_eq!(after.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_storage_failure_is_a_dependency_error() {
    let mut events = MockEventRepo::new();
    events
        .expect_find_events_by_status()
        .returning(|_| Err(StoreError::Backend(eyre::eyre!("connection refused"))));
    let ctx = TestContext::with_parts(
        Arc::new(events),
        Arc::new(InMemoryStore::new()),
        Arc::new(quiet_notifier()),
    );

    let response = ctx.server.get("/api/events/pending").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "DEPENDENCY_ERROR");
    assert!(!response.text().contains("connection refused"));
}
