use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::eyre;
use uuid::Uuid;

use crate::{
    models::{
        attendee::Attendee,
        event::{Event, EventStatus},
    },
    overlap::find_overlapping,
    repository::{AttendeeRepository, EventRepository, StoreError, StoreResult},
};

#[derive(Debug, Default)]
struct State {
    events: Vec<Event>,
    attendees: Vec<Attendee>,
}

/// Process-local store backing both repository traits.
///
/// Used for development without PostgreSQL and throughout the test suites.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| StoreError::Backend(eyre!("in-memory store lock poisoned")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| StoreError::Backend(eyre!("in-memory store lock poisoned")))
    }

    fn sorted_by_start(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by_key(|event| event.start);
        events
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn find_event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.read()?.events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_events_by_location_and_status(
        &self,
        location: &str,
        statuses: &[EventStatus],
    ) -> StoreResult<Vec<Event>> {
        let events = self
            .read()?
            .events
            .iter()
            .filter(|e| e.location == location && statuses.contains(&e.status))
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(events))
    }

    async fn find_events_by_status(&self, status: EventStatus) -> StoreResult<Vec<Event>> {
        let events = self
            .read()?
            .events
            .iter()
            .filter(|e| e.status == status)
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(events))
    }

    async fn find_events_by_creator(&self, created_by: &str) -> StoreResult<Vec<Event>> {
        let events = self
            .read()?
            .events
            .iter()
            .filter(|e| e.created_by == created_by)
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(events))
    }

    async fn find_events_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: EventStatus,
    ) -> StoreResult<Vec<Event>> {
        let events = self
            .read()?
            .events
            .iter()
            .filter(|e| e.status == status && e.start >= from && e.start < to)
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(events))
    }

    async fn insert_event(&self, event: &Event) -> StoreResult<()> {
        let mut state = self.write()?;

        if EventStatus::OCCUPYING.contains(&event.status)
            && find_overlapping(&state.events, &event.location, event.start, event.end, Some(event.id))
                .is_some()
        {
            return Err(StoreError::Overlap);
        }
        if state.events.iter().any(|e| e.id == event.id) {
            return Err(StoreError::Duplicate);
        }

        state.events.push(event.clone());
        Ok(())
    }

    async fn save_event(&self, event: &Event, expected: EventStatus) -> StoreResult<bool> {
        let mut state = self.write()?;

        match state
            .events
            .iter_mut()
            .find(|e| e.id == event.id && e.status == expected)
        {
            Some(stored) => {
                stored.status = event.status;
                stored.join_link = event.join_link.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.write()?;
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        if state.events.len() == before {
            return Ok(false);
        }

        state.attendees.retain(|a| a.event_id != id);
        Ok(true)
    }
}

#[async_trait]
impl AttendeeRepository for InMemoryStore {
    async fn find_attendee(&self, event_id: Uuid, email: &str) -> StoreResult<Option<Attendee>> {
        Ok(self
            .read()?
            .attendees
            .iter()
            .find(|a| a.event_id == event_id && a.email == email)
            .cloned())
    }

    async fn insert_attendee(&self, attendee: &Attendee) -> StoreResult<()> {
        let mut state = self.write()?;

        if state
            .attendees
            .iter()
            .any(|a| a.id == attendee.id || (a.event_id == attendee.event_id && a.email == attendee.email))
        {
            return Err(StoreError::Duplicate);
        }

        state.attendees.push(attendee.clone());
        Ok(())
    }

    async fn find_attendees_by_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>> {
        let mut attendees: Vec<Attendee> = self
            .read()?
            .attendees
            .iter()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect();
        attendees.sort_by_key(|a| a.registered_at);
        Ok(attendees)
    }

    async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.write()?;
        let before = state.attendees.len();
        state.attendees.retain(|a| a.id != id);
        Ok(state.attendees.len() < before)
    }
}
