use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub branch_or_year: String,
    pub email: String,
    pub phone: String,
    /// Copied from the event when the attendee registered.
    pub is_paid: bool,
    pub payment_proof: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Sign-up form fields. Missing fields deserialize as empty and are
/// reported as validation errors rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub branch_or_year: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub payment_proof: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAttendeeRequest {
    pub event_id: Uuid,
    #[serde(flatten)]
    pub form: AttendeeForm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAttendeeResponse {
    pub message: String,
    pub attendee: Attendee,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderReport {
    pub events: usize,
    pub sent: usize,
    pub failed: usize,
}

impl ReminderReport {
    pub fn merge(&mut self, other: ReminderReport) {
        self.events += other.events;
        self.sent += other.sent;
        self.failed += other.failed;
    }
}
