use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{EventError, EventResult},
    models::{
        attendee::{Attendee, AttendeeForm},
        event::{EventStatus, EventSummary},
    },
    notifier::{self, Notifier},
    repository::{AttendeeRepository, EventRepository, StoreError},
    validation,
};

/// Records attendee sign-ups against approved events.
#[derive(Clone)]
pub struct RegistrationManager {
    events: Arc<dyn EventRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationManager {
    pub fn new(
        events: Arc<dyn EventRepository>,
        attendees: Arc<dyn AttendeeRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            events,
            attendees,
            notifier,
        }
    }

    pub async fn register_attendee(&self, event_id: Uuid, form: AttendeeForm) -> EventResult<Attendee> {
        let event = self
            .events
            .find_event_by_id(event_id)
            .await?
            .ok_or_else(|| EventError::NotFound(format!("Event with ID {} not found", event_id)))?;

        if event.status != EventStatus::Approved {
            return Err(EventError::validation("Event is not yet approved"));
        }

        validation::require_fields(&[
            ("name", form.name.as_str()),
            ("branch_or_year", form.branch_or_year.as_str()),
            ("email", form.email.as_str()),
            ("phone", form.phone.as_str()),
        ])?;

        let email = form.email.trim().to_lowercase();
        let phone = form.phone.trim().to_string();
        if !validation::is_valid_email(&email) {
            return Err(EventError::validation(format!("{} is not a valid email address", form.email)));
        }
        if !validation::is_valid_phone(&phone) {
            return Err(EventError::validation(format!(
                "{} is not a valid phone number. Use exactly 10 digits",
                form.phone
            )));
        }

        let payment_proof = if event.is_paid {
            match form.payment_proof.filter(|proof| !proof.trim().is_empty()) {
                Some(proof) => Some(proof),
                None => {
                    return Err(EventError::validation(
                        "Payment proof is required for paid events",
                    ));
                }
            }
        } else {
            None
        };

        if self.attendees.find_attendee(event_id, &email).await?.is_some() {
            return Err(already_registered());
        }

        let attendee = Attendee {
            id: Uuid::new_v4(),
            event_id,
            name: form.name.trim().to_string(),
            branch_or_year: form.branch_or_year.trim().to_string(),
            email,
            phone,
            is_paid: event.is_paid,
            payment_proof,
            registered_at: Utc::now(),
        };

        match self.attendees.insert_attendee(&attendee).await {
            Ok(()) => {}
            Err(StoreError::Duplicate) => return Err(already_registered()),
            Err(err) => return Err(err.into()),
        }
        info!("Registered {} for event {}", attendee.email, event_id);

        let summary = EventSummary::from(&event);
        let send = self
            .notifier
            .send_registration_confirmation(&attendee.email, &attendee.name, &summary);
        if let Err(e) = notifier::within_deadline(send).await {
            warn!("Failed to send registration confirmation to {}: {:#}", attendee.email, e);
        }

        Ok(attendee)
    }

    /// Attendees in registration order. An event without sign-ups yields an
    /// empty list.
    pub async fn list_attendees(&self, event_id: Uuid) -> EventResult<Vec<Attendee>> {
        Ok(self.attendees.find_attendees_by_event(event_id).await?)
    }

    pub async fn remove_attendee(&self, attendee_id: Uuid) -> EventResult<()> {
        if !self.attendees.delete_attendee(attendee_id).await? {
            return Err(EventError::NotFound(format!(
                "Attendee with ID {} not found",
                attendee_id
            )));
        }
        info!("Removed attendee {}", attendee_id);
        Ok(())
    }
}

fn already_registered() -> EventError {
    EventError::Conflict("You are already registered for this event".to_string())
}
