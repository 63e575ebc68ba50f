#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eventhall_core::{
    auth::{hash_secret, AdminGrant, AdminKey},
    join_link::JoinLinks,
    lifecycle::EventLifecycleManager,
    models::event::{CreateEventRequest, EventSummary},
    notifier::Notifier,
    registration::RegistrationManager,
    reminders::ReminderDispatcher,
    repository::memory::InMemoryStore,
};
use eyre::{eyre, Result};

pub const BASE_URL: &str = "https://events.example.edu";
pub const ADMIN_TOKEN: &str = "let-me-in";

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Approval { to: String, event_name: String, join_link: String },
    Reminder { to: String, attendee_name: String, event_name: String },
    Confirmation { to: String, attendee_name: String, event_name: String },
}

/// Records every notice and optionally fails sends to chosen recipients.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_for: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn fail_for(&self, to: &str) {
        self.fail_for.lock().unwrap().push(to.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn deliver(&self, to: &str, notice: Sent) -> Result<()> {
        if self.fail_for.lock().unwrap().iter().any(|r| r == to) {
            return Err(eyre!("SMTP connection refused"));
        }
        self.sent.lock().unwrap().push(notice);
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_approval_notice(&self, to: &str, event_name: &str, join_link: &str) -> Result<()> {
        self.deliver(
            to,
            Sent::Approval {
                to: to.to_string(),
                event_name: event_name.to_string(),
                join_link: join_link.to_string(),
            },
        )
    }

    async fn send_reminder_notice(&self, to: &str, attendee_name: &str, event: &EventSummary) -> Result<()> {
        self.deliver(
            to,
            Sent::Reminder {
                to: to.to_string(),
                attendee_name: attendee_name.to_string(),
                event_name: event.name.clone(),
            },
        )
    }

    async fn send_registration_confirmation(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()> {
        self.deliver(
            to,
            Sent::Confirmation {
                to: to.to_string(),
                attendee_name: attendee_name.to_string(),
                event_name: event.name.clone(),
            },
        )
    }
}

pub struct Harness {
    pub store: InMemoryStore,
    pub notifier: Arc<RecordingNotifier>,
    pub lifecycle: EventLifecycleManager,
    pub registrations: RegistrationManager,
    pub reminders: ReminderDispatcher,
    pub grant: AdminGrant,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(store.clone());
        let attendees = Arc::new(store.clone());

        let lifecycle = EventLifecycleManager::new(
            events.clone(),
            attendees.clone(),
            notifier.clone(),
            JoinLinks::new(BASE_URL),
        );
        let registrations = RegistrationManager::new(events.clone(), attendees.clone(), notifier.clone());
        let reminders = ReminderDispatcher::new(events, attendees, notifier.clone());

        let key = AdminKey::from_hash(hash_secret(ADMIN_TOKEN).unwrap()).unwrap();
        let grant = key.authorize(ADMIN_TOKEN).unwrap();

        Self {
            store,
            notifier,
            lifecycle,
            registrations,
            reminders,
            grant,
        }
    }
}

/// Same-day booking at `location` between two `HH:MM` times.
pub fn booking(name: &str, location: &str, date: &str, start: &str, end: &str) -> CreateEventRequest {
    CreateEventRequest {
        name: name.to_string(),
        location: location.to_string(),
        start_date: date.to_string(),
        start_time: start.to_string(),
        end_date: date.to_string(),
        end_time: end.to_string(),
        description: None,
        created_by: "organizer@example.edu".to_string(),
        is_paid: false,
        id_card_image: Some("data:image/png;base64,AAAA".to_string()),
        event_thumbnail: None,
    }
}
