use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use eventhall_core::models::{
    attendee::{AttendeeForm, RegisterAttendeeResponse},
    event::{CreateEventRequest, CreateEventResponse, Event, EventDetails, EventStatus},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::MessageResponse,
    middleware::{auth::AdminAccess, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_event(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    let Json(payload) = payload?;

    let event = state.lifecycle.create_event(payload).await?;

    let response = CreateEventResponse {
        message: "Event created successfully and submitted for approval".to_string(),
        event,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_pending_events(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state
        .lifecycle
        .list_events_by_status(EventStatus::Pending)
        .await?;
    Ok(Json(events))
}

pub async fn list_approved_events(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state
        .lifecycle
        .list_events_by_status(EventStatus::Approved)
        .await?;
    Ok(Json(events))
}

pub async fn get_approved_event(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Event>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.lifecycle.get_approved_event(id).await?))
}

pub async fn list_events_by_creator(
    State(state): State<Arc<ApiState>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.lifecycle.list_events_by_creator(&email).await?))
}

/// The event with its registered attendees.
pub async fn get_event(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<EventDetails>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.lifecycle.get_event_details(id).await?))
}

pub async fn delete_event(
    State(state): State<Arc<ApiState>>,
    AdminAccess(grant): AdminAccess,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;

    state.lifecycle.delete_event(&grant, id).await?;

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// Resolves a join link to the approved event it points at.
pub async fn resolve_join_link(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Event>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.lifecycle.get_approved_event(id).await?))
}

/// Registration through the join link; the event id comes from the path.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn join_event(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AttendeeForm>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterAttendeeResponse>), AppError> {
    let Path(id) = id?;
    let Json(form) = payload?;

    let attendee = state.registrations.register_attendee(id, form).await?;

    let response = RegisterAttendeeResponse {
        message: "Successfully registered for the event".to_string(),
        attendee,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
