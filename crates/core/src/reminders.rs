//! # Reminder Dispatch
//!
//! Nothing here schedules itself. A trigger outside the core (the
//! `send-reminders` binary run from cron, or the admin endpoint) asks for
//! the approved events starting on a given day and this module emails each
//! attendee once.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::AdminGrant,
    errors::{EventError, EventResult},
    models::{
        attendee::ReminderReport,
        event::{Event, EventStatus, EventSummary},
    },
    notifier::{self, Notifier},
    repository::{AttendeeRepository, EventRepository},
};

#[derive(Clone)]
pub struct ReminderDispatcher {
    events: Arc<dyn EventRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderDispatcher {
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

    /// Approved events whose start falls on `date` (UTC).
    pub async fn events_starting_on(&self, date: NaiveDate) -> EventResult<Vec<Event>> {
        let from = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let to = date
            .checked_add_days(Days::new(1))
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());

        let (Some(from), Some(to)) = (from, to) else {
            return Err(EventError::validation(format!("Date {} is out of range", date)));
        };

        Ok(self
            .events
            .find_events_starting_between(from, to, EventStatus::Approved)
            .await?)
    }

    pub async fn send_reminders_for_day(&self, date: NaiveDate) -> EventResult<ReminderReport> {
        let events = self.events_starting_on(date).await?;
        if events.is_empty() {
            info!("No events scheduled for {}", date);
        }

        let mut report = ReminderReport::default();
        for event in &events {
            report.merge(self.remind_attendees(event).await?);
        }

        info!(
            "Reminders for {}: {} event(s), {} sent, {} failed",
            date, report.events, report.sent, report.failed
        );
        Ok(report)
    }

    /// Manual trigger for a single event.
    pub async fn send_reminders_for_event(
        &self,
        _grant: &AdminGrant,
        event_id: Uuid,
    ) -> EventResult<ReminderReport> {
        let event = self
            .events
            .find_event_by_id(event_id)
            .await?
            .ok_or_else(|| EventError::NotFound(format!("Event with ID {} not found", event_id)))?;

        self.remind_attendees(&event).await
    }

    async fn remind_attendees(&self, event: &Event) -> EventResult<ReminderReport> {
        let attendees = self.attendees.find_attendees_by_event(event.id).await?;
        let summary = EventSummary::from(event);
        let mut report = ReminderReport {
            events: 1,
            ..ReminderReport::default()
        };

        if attendees.is_empty() {
            info!("No attendees for event {} ({})", event.id, event.name);
            return Ok(report);
        }

        for attendee in &attendees {
            let send = self
                .notifier
                .send_reminder_notice(&attendee.email, &attendee.name, &summary);
            match notifier::within_deadline(send).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    warn!("Failed to send reminder to {}: {:#}", attendee.email, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
