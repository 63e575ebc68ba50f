//! # Storage Seams
//!
//! The managers talk to storage only through these traits. Implementations
//! must make the two check-then-insert paths atomic:
//!
//! - [`EventRepository::insert_event`] fails with [`StoreError::Overlap`]
//!   when an occupying event at the same location overlaps the new one.
//! - [`AttendeeRepository::insert_attendee`] fails with
//!   [`StoreError::Duplicate`] when the `(event_id, email)` pair exists.
//!
//! PostgreSQL enforces both with constraints (see `eventhall-db`); the
//! in-memory store checks and inserts under a single write lock.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    errors::EventError,
    models::{
        attendee::Attendee,
        event::{Event, EventStatus},
    },
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("an occupying event already overlaps this interval at the location")]
    Overlap,

    #[error("a record with the same unique key already exists")]
    Duplicate,

    #[error(transparent)]
    Backend(#[from] eyre::Report),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for EventError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Overlap => EventError::Conflict(
                "Another event is already scheduled at this time and location".to_string(),
            ),
            StoreError::Duplicate => EventError::Conflict("Record already exists".to_string()),
            StoreError::Backend(report) => EventError::Dependency(report),
        }
    }
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>>;

    async fn find_events_by_location_and_status(
        &self,
        location: &str,
        statuses: &[EventStatus],
    ) -> StoreResult<Vec<Event>>;

    /// Ordered by start time.
    async fn find_events_by_status(&self, status: EventStatus) -> StoreResult<Vec<Event>>;

    /// Ordered by start time.
    async fn find_events_by_creator(&self, created_by: &str) -> StoreResult<Vec<Event>>;

    /// Events in `status` whose start lies in `[from, to)`, ordered by start.
    async fn find_events_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: EventStatus,
    ) -> StoreResult<Vec<Event>>;

    async fn insert_event(&self, event: &Event) -> StoreResult<()>;

    /// Writes the event's status and join link, but only while the stored
    /// status still equals `expected`. Returns false when nothing was written.
    async fn save_event(&self, event: &Event, expected: EventStatus) -> StoreResult<bool>;

    /// Removes the event and every attendee registered for it in one step.
    async fn delete_event(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    async fn find_attendee(&self, event_id: Uuid, email: &str) -> StoreResult<Option<Attendee>>;

    async fn insert_attendee(&self, attendee: &Attendee) -> StoreResult<()>;

    /// Ordered by registration time.
    async fn find_attendees_by_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>>;

    async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool>;
}
