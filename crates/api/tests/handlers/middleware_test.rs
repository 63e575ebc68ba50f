use axum::{
    body::to_bytes,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode},
};
use chrono::{TimeZone, Utc};
use eventhall_api::{
    config::{parse_log_level, ApiConfig},
    middleware::{
        auth::bearer_token,
        error_handling::{map_error, status_for, INTERNAL_ERROR_MESSAGE},
    },
};
use eventhall_core::errors::{ConflictingEvent, EventError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use tracing::Level;
use uuid::Uuid;

#[rstest]
#[case(EventError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(EventError::NotFound("gone".into()), StatusCode::NOT_FOUND)]
#[case(EventError::Conflict("dup".into()), StatusCode::CONFLICT)]
#[case(EventError::InvalidTransition("done".into()), StatusCode::CONFLICT)]
#[case(EventError::Unauthorized("who".into()), StatusCode::UNAUTHORIZED)]
#[case(EventError::Dependency(eyre::eyre!("db down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_status_mapping(#[case] error: EventError, #[case] status: StatusCode) {
    assert_eq!(status_for(&error), status);
}

#[tokio::test]
async fn test_error_body_carries_code_and_conflict() {
    let conflict = ConflictingEvent {
        id: Uuid::new_v4(),
        name: "Symposium".to_string(),
        location: "Hall 1".to_string(),
        start: Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
    };

    let response = map_error(EventError::ScheduleConflict(Box::new(conflict)));

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "SCHEDULE_CONFLICT");
    assert_eq!(body["conflicting_event"]["name"], "Symposium");
    assert!(body["error"].as_str().unwrap().starts_with("Scheduling conflict:"));
}

#[tokio::test]
async fn test_dependency_error_body_hides_the_cause() {
    let response = map_error(EventError::Dependency(eyre::eyre!(
        "password authentication failed for user \"eventhall\" at db.internal:5432"
    )));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "DEPENDENCY_ERROR");
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert!(!String::from_utf8_lossy(&bytes).contains("db.internal"));
}

#[rstest]
#[case(Some("Bearer abc123"), Some("abc123"))]
#[case(Some("bearer  abc123 "), Some("abc123"))]
#[case(Some("Basic dXNlcjpwYXNz"), None)]
#[case(Some("abc123"), None)]
#[case(None, None)]
fn test_bearer_token_parsing(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
    let mut headers = HeaderMap::new();
    if let Some(value) = header {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    }

    assert_eq!(bearer_token(&headers), expected);
}

#[test]
fn test_config_defaults() {
    let config = ApiConfig::from_vars(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/eventhall".to_string()),
        "ADMIN_KEY_HASH" => Some("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.public_base_url, "http://localhost:3000");
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.log_level, Level::INFO);
}

#[test]
fn test_config_requires_database_and_admin_hash() {
    let no_admin = ApiConfig::from_vars(|key| {
        (key == "DATABASE_URL").then(|| "postgres://localhost/eventhall".to_string())
    });
    let no_database = ApiConfig::from_vars(|key| (key == "ADMIN_KEY_HASH").then(String::new));

    assert!(no_admin.is_err());
    assert!(no_database.is_err());
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("verbose", Level::INFO)]
fn test_log_levels(#[case] value: &str, #[case] level: Level) {
    assert_eq!(parse_log_level(value), level);
}
