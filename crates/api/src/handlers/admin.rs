use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use eventhall_core::models::event::StatusChangeResponse;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminAccess, error_handling::AppError},
    ApiState,
};

pub async fn approve_event(
    State(state): State<Arc<ApiState>>,
    AdminAccess(grant): AdminAccess,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StatusChangeResponse>, AppError> {
    let Path(id) = id?;

    let event = state.lifecycle.approve_event(&grant, id).await?;

    Ok(Json(StatusChangeResponse {
        message: "Event approved successfully".to_string(),
        event,
    }))
}

pub async fn reject_event(
    State(state): State<Arc<ApiState>>,
    AdminAccess(grant): AdminAccess,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StatusChangeResponse>, AppError> {
    let Path(id) = id?;

    let event = state.lifecycle.reject_event(&grant, id).await?;

    Ok(Json(StatusChangeResponse {
        message: "Event rejected successfully".to_string(),
        event,
    }))
}
