use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use eventhall_core::models::attendee::{
    Attendee, RegisterAttendeeRequest, RegisterAttendeeResponse, ReminderReport,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::MessageResponse,
    middleware::{auth::AdminAccess, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: ReminderReport,
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn register_attendee(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<RegisterAttendeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterAttendeeResponse>), AppError> {
    let Json(RegisterAttendeeRequest { event_id, form }) = payload?;

    let attendee = state.registrations.register_attendee(event_id, form).await?;

    let response = RegisterAttendeeResponse {
        message: "Successfully registered for the event".to_string(),
        attendee,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_attendees(
    State(state): State<Arc<ApiState>>,
    event_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Attendee>>, AppError> {
    let Path(event_id) = event_id?;
    Ok(Json(state.registrations.list_attendees(event_id).await?))
}

pub async fn remove_attendee(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;

    state.registrations.remove_attendee(id).await?;

    Ok(Json(MessageResponse::new("Attendee removed successfully")))
}

pub async fn send_reminders(
    State(state): State<Arc<ApiState>>,
    AdminAccess(grant): AdminAccess,
    event_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ReminderResponse>, AppError> {
    let Path(event_id) = event_id?;

    let report = state
        .reminders
        .send_reminders_for_event(&grant, event_id)
        .await?;

    Ok(Json(ReminderResponse {
        message: format!("Reminders sent to {} attendee(s)", report.sent),
        report,
    }))
}
