use crate::models::DbAttendee;
use eventhall_core::models::attendee::Attendee;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_attendee(pool: &Pool<Postgres>, attendee: &Attendee) -> Result<DbAttendee> {
    tracing::debug!(
        "Registering attendee: id={}, event_id={}, email={}",
        attendee.id, attendee.event_id, attendee.email
    );

    let row = sqlx::query_as::<_, DbAttendee>(
        r#"
        INSERT INTO attendees
            (id, event_id, name, branch_or_year, email, phone, is_paid, payment_proof, registered_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, event_id, name, branch_or_year, email, phone, is_paid, payment_proof, registered_at
        "#,
    )
    .bind(attendee.id)
    .bind(attendee.event_id)
    .bind(&attendee.name)
    .bind(&attendee.branch_or_year)
    .bind(&attendee.email)
    .bind(&attendee.phone)
    .bind(attendee.is_paid)
    .bind(&attendee.payment_proof)
    .bind(attendee.registered_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_attendee_by_event_and_email(
    pool: &Pool<Postgres>,
    event_id: Uuid,
    email: &str,
) -> Result<Option<DbAttendee>> {
    let row = sqlx::query_as::<_, DbAttendee>(
        r#"
        SELECT id, event_id, name, branch_or_year, email, phone, is_paid, payment_proof, registered_at
        FROM attendees
        WHERE event_id = $1 AND email = $2
        "#,
    )
    .bind(event_id)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_attendees_by_event_id(
    pool: &Pool<Postgres>,
    event_id: Uuid,
) -> Result<Vec<DbAttendee>> {
    let rows = sqlx::query_as::<_, DbAttendee>(
        r#"
        SELECT id, event_id, name, branch_or_year, email, phone, is_paid, payment_proof, registered_at
        FROM attendees
        WHERE event_id = $1
        ORDER BY registered_at
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn delete_attendee(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM attendees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
