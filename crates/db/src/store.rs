//! PostgreSQL implementations of the core storage traits.
//!
//! Atomicity of the booking and registration checks is delegated to the
//! `no_overlapping_bookings` exclusion constraint and the
//! `unique_event_email` unique constraint created in [`crate::schema`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventhall_core::{
    models::{
        attendee::Attendee,
        event::{Event, EventStatus},
    },
    repository::{AttendeeRepository, EventRepository, StoreError, StoreResult},
};
use uuid::Uuid;

use crate::{
    models::into_events,
    repositories::{attendee, event},
    DbPool,
};

const EXCLUSION_VIOLATION: &str = "23P01";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Maps constraint violations raised by a write to their store-level meaning.
pub fn classify_write_error(report: eyre::Report) -> StoreError {
    let code = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| match err {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        });

    match code.as_deref() {
        Some(EXCLUSION_VIOLATION) => StoreError::Overlap,
        Some(UNIQUE_VIOLATION) => StoreError::Duplicate,
        _ => StoreError::Backend(report),
    }
}

#[async_trait]
impl EventRepository for PgStore {
    async fn find_event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let row = event::get_event_by_id(&self.pool, id).await?;
        Ok(row.map(Event::try_from).transpose()?)
    }

    async fn find_events_by_location_and_status(
        &self,
        location: &str,
        statuses: &[EventStatus],
    ) -> StoreResult<Vec<Event>> {
        let rows = event::get_events_by_location_and_status(&self.pool, location, statuses).await?;
        Ok(into_events(rows)?)
    }

    async fn find_events_by_status(&self, status: EventStatus) -> StoreResult<Vec<Event>> {
        let rows = event::get_events_by_status(&self.pool, status).await?;
        Ok(into_events(rows)?)
    }

    async fn find_events_by_creator(&self, created_by: &str) -> StoreResult<Vec<Event>> {
        let rows = event::get_events_by_creator(&self.pool, created_by).await?;
        Ok(into_events(rows)?)
    }

    async fn find_events_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: EventStatus,
    ) -> StoreResult<Vec<Event>> {
        let rows = event::get_events_starting_between(&self.pool, from, to, status).await?;
        Ok(into_events(rows)?)
    }

    async fn insert_event(&self, new_event: &Event) -> StoreResult<()> {
        event::create_event(&self.pool, new_event)
            .await
            .map_err(classify_write_error)?;
        Ok(())
    }

    async fn save_event(&self, updated: &Event, expected: EventStatus) -> StoreResult<bool> {
        event::update_event_status(
            &self.pool,
            updated.id,
            updated.status,
            updated.join_link.as_deref(),
            expected,
        )
        .await
        .map_err(classify_write_error)
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        Ok(event::delete_event(&self.pool, id).await?)
    }
}

#[async_trait]
impl AttendeeRepository for PgStore {
    async fn find_attendee(&self, event_id: Uuid, email: &str) -> StoreResult<Option<Attendee>> {
        let row = attendee::get_attendee_by_event_and_email(&self.pool, event_id, email).await?;
        Ok(row.map(Attendee::from))
    }

    async fn insert_attendee(&self, new_attendee: &Attendee) -> StoreResult<()> {
        attendee::create_attendee(&self.pool, new_attendee)
            .await
            .map_err(classify_write_error)?;
        Ok(())
    }

    async fn find_attendees_by_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>> {
        let rows = attendee::get_attendees_by_event_id(&self.pool, event_id).await?;
        Ok(rows.into_iter().map(Attendee::from).collect())
    }

    async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool> {
        Ok(attendee::delete_attendee(&self.pool, id).await?)
    }
}
