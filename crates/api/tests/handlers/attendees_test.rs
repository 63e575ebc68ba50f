use axum::http::StatusCode;
use eventhall_db::mock::MockNotifier;
use fake::{faker::name::en::Name, Fake};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{
    as_admin, attendee_form, booking, paid_booking, quiet_notifier, TestContext,
};

#[tokio::test]
async fn test_registration_waits_for_approval() {
    let ctx = TestContext::new();
    let event = ctx
        .create_event(booking("Guest Lecture", "Hall 4", "2025-03-20", "11:00", "12:00"))
        .await;
    let id = event["id"].as_str().unwrap().to_string();
    let mut body = attendee_form("Nikhil", "nikhil@example.edu");
    body["event_id"] = json!(id);

    let early = ctx.server.post("/api/attendees/register").json(&body).await;
    ctx.state
        .lifecycle
        .approve_event(&ctx.grant(), id.parse().unwrap())
        .await
        .unwrap();
    let later = ctx.server.post("/api/attendees/register").json(&body).await;

    assert_eq!(early.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(early.json::<Value>()["code"], "VALIDATION_ERROR");
    assert_eq!(later.status_code(), StatusCode::CREATED);
    assert_eq!(later.json::<Value>()["attendee"]["is_paid"], false);
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict_per_event() {
    let ctx = TestContext::new();
    let first = ctx
        .approved_event(booking("Chess Open", "Hall 1", "2025-03-21", "09:00", "17:00"))
        .await;
    let second = ctx
        .approved_event(booking("Go Open", "Hall 2", "2025-03-21", "09:00", "17:00"))
        .await;
    let form = attendee_form("Lakshmi", "lakshmi@example.edu");

    let once = ctx.server.post(&format!("/api/events/join/{first}")).json(&form).await;
    let twice = ctx
        .server
        .post(&format!("/api/events/join/{first}"))
        .json(&attendee_form("Lakshmi", "Lakshmi@Example.edu"))
        .await;
    let elsewhere = ctx.server.post(&format!("/api/events/join/{second}")).json(&form).await;

    assert_eq!(once.status_code(), StatusCode::CREATED);
    assert_eq!(twice.status_code(), StatusCode::CONFLICT);
    assert_eq!(twice.json::<Value>()["code"], "CONFLICT");
    assert_eq!(elsewhere.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_paid_event_needs_payment_proof() {
    let ctx = TestContext::new();
    let id = ctx
        .approved_event(paid_booking("Gala Dinner", "Mess Hall", "2025-03-22", "19:00", "22:00"))
        .await;
    let path = format!("/api/events/join/{id}");

    let without = ctx
        .server
        .post(&path)
        .json(&attendee_form("Farah", "farah@example.edu"))
        .await;
    let mut form = attendee_form("Farah", "farah@example.edu");
    form["payment_proof"] = json!("uploads/receipt-221.png");
    let with = ctx.server.post(&path).json(&form).await;

    assert_eq!(without.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(with.status_code(), StatusCode::CREATED);
    let attendee = &with.json::<Value>()["attendee"];
    assert_eq!(attendee["is_paid"], true);
    assert_eq!(attendee["payment_proof"], "uploads/receipt-221.png");
}

#[tokio::test]
async fn test_bad_phone_is_a_validation_error() {
    let ctx = TestContext::new();
    let id = ctx
        .approved_event(booking("Coding Sprint", "Lab 2", "2025-03-23", "10:00", "16:00"))
        .await;
    let mut form = attendee_form("Irfan", "irfan@example.edu");
    form["phone"] = json!("98765");

    let response = ctx.server.post(&format!("/api/events/join/{id}")).json(&form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_list_and_remove_attendees() {
    let ctx = TestContext::new();
    let id = ctx
        .approved_event(booking("Book Fair", "Library", "2025-03-24", "10:00", "18:00"))
        .await;
    for n in 0..3 {
        let name: String = Name().fake();
        ctx.server
            .post(&format!("/api/events/join/{id}"))
            .json(&attendee_form(&name, &format!("reader{n}@example.edu")))
            .await;
    }

    let listed = ctx
        .server
        .get(&format!("/api/attendees/{id}"))
        .await
        .json::<Vec<Value>>();
    let first = listed[0]["id"].as_str().unwrap().to_string();
    let removed = ctx.server.delete(&format!("/api/attendees/remove/{first}")).await;
    let removed_again = ctx.server.delete(&format!("/api/attendees/remove/{first}")).await;
    let remaining = ctx
        .server
        .get(&format!("/api/attendees/{id}"))
        .await
        .json::<Vec<Value>>();

    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0]["email"], "reader0@example.edu");
    assert_eq!(removed.status_code(), StatusCode::OK);
    assert_eq!(removed_again.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(remaining.len(), 2);
}

#[tokio::test]
async fn test_event_without_attendees_lists_empty() {
    let ctx = TestContext::new();
    let id = ctx
        .approved_event(booking("Quiet Hour", "Library", "2025-03-25", "08:00", "09:00"))
        .await;

    let response = ctx.server.get(&format!("/api/attendees/{id}")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Value>>(), Vec::<Value>::new());
}

#[tokio::test]
async fn test_manual_reminders_are_admin_only_and_counted() {
    let mut notifier = quiet_notifier_without_reminders();
    notifier
        .expect_send_reminder_notice()
        .times(2)
        .returning(|_, _, _| Ok(()));
    let ctx = TestContext::with_notifier(notifier);
    let id = ctx
        .approved_event(booking("Orientation", "Auditorium", "2025-03-26", "09:00", "12:00"))
        .await;
    for email in ["one@example.edu", "two@example.edu"] {
        ctx.server
            .post(&format!("/api/events/join/{id}"))
            .json(&attendee_form("Student", email))
            .await;
    }
    let path = format!("/api/attendees/send-reminder/{id}");

    let anonymous = ctx.server.post(&path).await;
    let admin = as_admin(ctx.server.post(&path)).await;

    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(admin.status_code(), StatusCode::OK);
    let body = admin.json::<Value>();
    assert_eq!(body["sent"], 2);
    assert_eq!(body["failed"], 0);
}

fn quiet_notifier_without_reminders() -> MockNotifier {
    let mut notifier = MockNotifier::new();
    notifier.expect_send_approval_notice().returning(|_, _, _| Ok(()));
    notifier
        .expect_send_registration_confirmation()
        .returning(|_, _, _| Ok(()));
    notifier
}

#[tokio::test]
async fn test_unknown_event_registration_is_not_found() {
    let ctx = TestContext::with_notifier(quiet_notifier());

    let response = ctx
        .server
        .post("/api/events/join/0b7a9a40-1111-4222-8333-444455556666")
        .json(&attendee_form("Zoya", "zoya@example.edu"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
