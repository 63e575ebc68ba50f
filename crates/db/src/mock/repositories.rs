use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventhall_core::{
    models::{
        attendee::Attendee,
        event::{Event, EventStatus, EventSummary},
    },
    notifier::Notifier,
    repository::{AttendeeRepository, EventRepository, StoreResult},
};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub EventRepo {}

    #[async_trait]
    impl EventRepository for EventRepo {
        async fn find_event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>>;

        async fn find_events_by_location_and_status(
            &self,
            location: &str,
            statuses: &[EventStatus],
        ) -> StoreResult<Vec<Event>>;

        async fn find_events_by_status(&self, status: EventStatus) -> StoreResult<Vec<Event>>;

        async fn find_events_by_creator(&self, created_by: &str) -> StoreResult<Vec<Event>>;

        async fn find_events_starting_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
            status: EventStatus,
        ) -> StoreResult<Vec<Event>>;

        async fn insert_event(&self, event: &Event) -> StoreResult<()>;

        async fn save_event(&self, event: &Event, expected: EventStatus) -> StoreResult<bool>;

        async fn delete_event(&self, id: Uuid) -> StoreResult<bool>;
    }
}

mock! {
    pub AttendeeRepo {}

    #[async_trait]
    impl AttendeeRepository for AttendeeRepo {
        async fn find_attendee(&self, event_id: Uuid, email: &str) -> StoreResult<Option<Attendee>>;

        async fn insert_attendee(&self, attendee: &Attendee) -> StoreResult<()>;

        async fn find_attendees_by_event(&self, event_id: Uuid) -> StoreResult<Vec<Attendee>>;

        async fn delete_attendee(&self, id: Uuid) -> StoreResult<bool>;
    }
}

mock! {
    pub Notifier {}

    #[async_trait]
    impl Notifier for Notifier {
        async fn send_approval_notice(
            &self,
            to: &str,
            event_name: &str,
            join_link: &str,
        ) -> eyre::Result<()>;

        async fn send_reminder_notice(
            &self,
            to: &str,
            attendee_name: &str,
            event: &EventSummary,
        ) -> eyre::Result<()>;

        async fn send_registration_confirmation(
            &self,
            to: &str,
            attendee_name: &str,
            event: &EventSummary,
        ) -> eyre::Result<()>;
    }
}
