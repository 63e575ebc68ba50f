use crate::models::DbEvent;
use chrono::{DateTime, Utc};
use eventhall_core::models::event::{Event, EventStatus};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const EVENT_COLUMNS: &str = "id, name, location, description, start_time, end_time, created_by, \
     is_paid, id_card_image, event_thumbnail, status, join_link, created_at";

pub async fn create_event(pool: &Pool<Postgres>, event: &Event) -> Result<DbEvent> {
    tracing::debug!(
        "Creating event: id={}, name={}, location={}, start={}, end={}",
        event.id, event.name, event.location, event.start, event.end
    );

    let row = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        INSERT INTO events ({EVENT_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(event.id)
    .bind(&event.name)
    .bind(&event.location)
    .bind(&event.description)
    .bind(event.start)
    .bind(event.end)
    .bind(&event.created_by)
    .bind(event.is_paid)
    .bind(&event.id_card_image)
    .bind(&event.event_thumbnail)
    .bind(event.status.as_str())
    .bind(&event.join_link)
    .bind(event.created_at)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Event created successfully: id={}", row.id);
    Ok(row)
}

pub async fn get_event_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEvent>> {
    tracing::debug!("Getting event by id: {}", id);

    let row = sqlx::query_as::<_, DbEvent>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_events_by_location_and_status(
    pool: &Pool<Postgres>,
    location: &str,
    statuses: &[EventStatus],
) -> Result<Vec<DbEvent>> {
    let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

    let rows = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        SELECT {EVENT_COLUMNS} FROM events
        WHERE location = $1 AND status = ANY($2)
        ORDER BY start_time
        "#
    ))
    .bind(location)
    .bind(statuses)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_events_by_status(
    pool: &Pool<Postgres>,
    status: EventStatus,
) -> Result<Vec<DbEvent>> {
    let rows = sqlx::query_as::<_, DbEvent>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE status = $1 ORDER BY start_time"
    ))
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_events_by_creator(pool: &Pool<Postgres>, created_by: &str) -> Result<Vec<DbEvent>> {
    let rows = sqlx::query_as::<_, DbEvent>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE created_by = $1 ORDER BY start_time"
    ))
    .bind(created_by)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_events_starting_between(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    status: EventStatus,
) -> Result<Vec<DbEvent>> {
    let rows = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        SELECT {EVENT_COLUMNS} FROM events
        WHERE status = $1 AND start_time >= $2 AND start_time < $3
        ORDER BY start_time
        "#
    ))
    .bind(status.as_str())
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Compare-and-set on status; returns false when the row moved on or vanished.
pub async fn update_event_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: EventStatus,
    join_link: Option<&str>,
    expected: EventStatus,
) -> Result<bool> {
    tracing::debug!(
        "Updating event status: id={}, {} -> {}",
        id, expected, status
    );

    let result = sqlx::query(
        r#"
        UPDATE events
        SET status = $2, join_link = $3
        WHERE id = $1 AND status = $4
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(join_link)
    .bind(expected.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Attendee rows are removed by the `ON DELETE CASCADE` on `attendees.event_id`.
pub async fn delete_event(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
