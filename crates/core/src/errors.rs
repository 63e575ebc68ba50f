use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The already-booked event that blocked a new booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingEvent {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl fmt::Display for ConflictingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" is already scheduled at {} from {} to {}",
            self.name,
            self.location,
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scheduling conflict: {0}")]
    ScheduleConflict(Box<ConflictingEvent>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Dependency error: {0}")]
    Dependency(#[from] eyre::Report),
}

impl EventError {
    /// Stable machine-readable kind, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            EventError::NotFound(_) => "NOT_FOUND",
            EventError::Validation(_) => "VALIDATION_ERROR",
            EventError::ScheduleConflict(_) => "SCHEDULE_CONFLICT",
            EventError::Conflict(_) => "CONFLICT",
            EventError::InvalidTransition(_) => "INVALID_TRANSITION",
            EventError::Unauthorized(_) => "UNAUTHORIZED",
            EventError::Dependency(_) => "DEPENDENCY_ERROR",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        EventError::Validation(message.into())
    }
}

pub type EventResult<T> = Result<T, EventError>;
