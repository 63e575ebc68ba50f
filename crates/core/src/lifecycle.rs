//! # Event Lifecycle
//!
//! Owns the event state machine:
//!
//! ```text
//! pending ──approve──▶ approved
//!    │
//!    └─────reject────▶ rejected
//! ```
//!
//! `approved` and `rejected` are terminal. Creation runs the overlap check
//! before persisting, and approval notifies the organizer after the new
//! status is committed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    auth::AdminGrant,
    errors::{EventError, EventResult},
    join_link::JoinLinks,
    models::event::{CreateEventRequest, Event, EventDetails, EventStatus},
    notifier::{self, Notifier},
    overlap,
    repository::{AttendeeRepository, EventRepository, StoreError},
    validation,
};

#[derive(Clone)]
pub struct EventLifecycleManager {
    events: Arc<dyn EventRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    notifier: Arc<dyn Notifier>,
    links: JoinLinks,
}

impl EventLifecycleManager {
    pub fn new(
        events: Arc<dyn EventRepository>,
        attendees: Arc<dyn AttendeeRepository>,
        notifier: Arc<dyn Notifier>,
        links: JoinLinks,
    ) -> Self {
        Self {
            events,
            attendees,
            notifier,
            links,
        }
    }

    pub fn join_links(&self) -> &JoinLinks {
        &self.links
    }

    /// Validates a submission, rejects it if it collides with an occupying
    /// event at the same location, and stores it as pending.
    pub async fn create_event(&self, request: CreateEventRequest) -> EventResult<Event> {
        validation::require_fields(&[
            ("name", request.name.as_str()),
            ("location", request.location.as_str()),
            ("start_date", request.start_date.as_str()),
            ("start_time", request.start_time.as_str()),
            ("end_date", request.end_date.as_str()),
            ("end_time", request.end_time.as_str()),
            ("created_by", request.created_by.as_str()),
        ])?;

        let start = validation::parse_datetime(&request.start_date, &request.start_time)?;
        let end = validation::parse_datetime(&request.end_date, &request.end_time)?;
        validation::ensure_ordered(start, end)?;

        let location = request.location.trim().to_string();
        debug!("Checking {} for bookings between {} and {}", location, start, end);

        if let Some(conflict) =
            overlap::find_conflict(self.events.as_ref(), &location, start, end, None).await?
        {
            info!("Rejecting booking at {}: {}", location, conflict);
            return Err(EventError::ScheduleConflict(Box::new(conflict)));
        }

        let event = Event {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            location,
            description: request.description.unwrap_or_default(),
            start,
            end,
            created_by: request.created_by.trim().to_string(),
            is_paid: request.is_paid,
            id_card_image: request.id_card_image,
            event_thumbnail: request.event_thumbnail,
            status: EventStatus::Pending,
            join_link: None,
            created_at: Utc::now(),
        };

        match self.events.insert_event(&event).await {
            Ok(()) => {}
            Err(StoreError::Overlap) => {
                // Lost a race with a concurrent booking; report the winner.
                let conflict = overlap::find_conflict(
                    self.events.as_ref(),
                    &event.location,
                    start,
                    end,
                    Some(event.id),
                )
                .await?;
                return Err(match conflict {
                    Some(conflict) => EventError::ScheduleConflict(Box::new(conflict)),
                    None => StoreError::Overlap.into(),
                });
            }
            Err(err) => return Err(err.into()),
        }

        info!("Created pending event {} ({}) at {}", event.id, event.name, event.location);
        Ok(event)
    }

    /// Moves a pending event to approved, assigns its join link, then tells
    /// the organizer. Notification problems are logged and never returned.
    pub async fn approve_event(&self, _grant: &AdminGrant, id: Uuid) -> EventResult<Event> {
        let mut event = self.pending_event(id, "approved").await?;
        event.status = EventStatus::Approved;
        event.join_link = Some(self.links.link_for(id));

        self.commit_transition(&event).await?;
        info!("Approved event {} ({})", event.id, event.name);

        self.notify_approval(&event).await;
        Ok(event)
    }

    pub async fn reject_event(&self, _grant: &AdminGrant, id: Uuid) -> EventResult<Event> {
        let mut event = self.pending_event(id, "rejected").await?;
        event.status = EventStatus::Rejected;

        self.commit_transition(&event).await?;
        info!("Rejected event {} ({})", event.id, event.name);
        Ok(event)
    }

    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.events
            .find_event_by_id(id)
            .await?
            .ok_or_else(|| EventError::NotFound(format!("Event with ID {} not found", id)))
    }

    pub async fn get_event_details(&self, id: Uuid) -> EventResult<EventDetails> {
        let event = self.get_event(id).await?;
        let attendees = self.attendees.find_attendees_by_event(id).await?;
        Ok(EventDetails { event, attendees })
    }

    /// Looks up an event that attendees may join; anything not yet approved
    /// is reported as missing.
    pub async fn get_approved_event(&self, id: Uuid) -> EventResult<Event> {
        match self.events.find_event_by_id(id).await? {
            Some(event) if event.status == EventStatus::Approved => Ok(event),
            _ => Err(EventError::NotFound(format!("Approved event with ID {} not found", id))),
        }
    }

    pub async fn list_events_by_status(&self, status: EventStatus) -> EventResult<Vec<Event>> {
        Ok(self.events.find_events_by_status(status).await?)
    }

    pub async fn list_events_by_creator(&self, created_by: &str) -> EventResult<Vec<Event>> {
        validation::require_fields(&[("created_by", created_by)])?;
        Ok(self.events.find_events_by_creator(created_by.trim()).await?)
    }

    /// Removes an event together with its attendee records.
    pub async fn delete_event(&self, _grant: &AdminGrant, id: Uuid) -> EventResult<()> {
        if !self.events.delete_event(id).await? {
            return Err(EventError::NotFound(format!("Event with ID {} not found", id)));
        }

        info!("Deleted event {} and its attendees", id);
        Ok(())
    }

    async fn pending_event(&self, id: Uuid, target: &str) -> EventResult<Event> {
        let event = self.get_event(id).await?;

        if event.status != EventStatus::Pending {
            return Err(EventError::InvalidTransition(format!(
                "Event {} is already {} and cannot be {}",
                id, event.status, target
            )));
        }
        Ok(event)
    }

    async fn commit_transition(&self, event: &Event) -> EventResult<()> {
        if self.events.save_event(event, EventStatus::Pending).await? {
            return Ok(());
        }

        // Another request changed or removed the event since it was read.
        let current = self.get_event(event.id).await?;
        Err(EventError::InvalidTransition(format!(
            "Event {} is already {} and cannot be {}",
            event.id, current.status, event.status
        )))
    }

    async fn notify_approval(&self, event: &Event) {
        let Some(join_link) = event.join_link.as_deref() else {
            return;
        };

        if !validation::is_valid_email(&event.created_by) {
            warn!(
                "Skipping approval notice for event {}: creator '{}' is not an email address",
                event.id, event.created_by
            );
            return;
        }

        let send = self
            .notifier
            .send_approval_notice(&event.created_by, &event.name, join_link);
        match notifier::within_deadline(send).await {
            Ok(()) => info!("Approval notice sent to {}", event.created_by),
            Err(e) => warn!(
                "Failed to send approval notice for event {} to {}: {:#}",
                event.id, event.created_by, e
            ),
        }
    }
}
