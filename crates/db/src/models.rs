use chrono::{DateTime, Utc};
use eventhall_core::models::{
    attendee::Attendee,
    event::{Event, EventStatus},
};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: String,
    pub is_paid: bool,
    pub id_card_image: Option<String>,
    pub event_thumbnail: Option<String>,
    pub status: String,
    pub join_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub branch_or_year: String,
    pub email: String,
    pub phone: String,
    pub is_paid: bool,
    pub payment_proof: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl TryFrom<DbEvent> for Event {
    type Error = eyre::Report;

    fn try_from(row: DbEvent) -> Result<Self> {
        let status = row
            .status
            .parse::<EventStatus>()
            .map_err(|e| eyre!("Event {} has {}", row.id, e))?;

        Ok(Event {
            id: row.id,
            name: row.name,
            location: row.location,
            description: row.description,
            start: row.start_time,
            end: row.end_time,
            created_by: row.created_by,
            is_paid: row.is_paid,
            id_card_image: row.id_card_image,
            event_thumbnail: row.event_thumbnail,
            status,
            join_link: row.join_link,
            created_at: row.created_at,
        })
    }
}

impl From<DbAttendee> for Attendee {
    fn from(row: DbAttendee) -> Self {
        Attendee {
            id: row.id,
            event_id: row.event_id,
            name: row.name,
            branch_or_year: row.branch_or_year,
            email: row.email,
            phone: row.phone,
            is_paid: row.is_paid,
            payment_proof: row.payment_proof,
            registered_at: row.registered_at,
        }
    }
}

pub fn into_events(rows: Vec<DbEvent>) -> Result<Vec<Event>> {
    rows.into_iter().map(Event::try_from).collect()
}
