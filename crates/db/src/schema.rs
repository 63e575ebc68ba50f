use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for the equality half of the booking exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create events table. Pending and approved bookings at one location
    // may not share any instant of [start_time, end_time).
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_by TEXT NOT NULL,
            is_paid BOOLEAN NOT NULL DEFAULT FALSE,
            id_card_image TEXT NULL,
            event_thumbnail TEXT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            join_link TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'approved', 'rejected')),
            CONSTRAINT no_overlapping_bookings EXCLUDE USING gist (
                location WITH =,
                tstzrange(start_time, end_time, '[)') WITH &&
            ) WHERE (status IN ('pending', 'approved'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendees table. Rows go away with their event.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            branch_or_year TEXT NOT NULL,
            email TEXT NOT NULL,
            phone VARCHAR(10) NOT NULL,
            is_paid BOOLEAN NOT NULL DEFAULT FALSE,
            payment_proof TEXT NULL,
            registered_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_event_email UNIQUE (event_id, email),
            CONSTRAINT valid_phone CHECK (phone ~ '^[0-9]{10}$'),
            CONSTRAINT proof_matches_payment CHECK (is_paid = (payment_proof IS NOT NULL))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_events_status ON events(status);",
        "CREATE INDEX IF NOT EXISTS idx_events_created_by ON events(created_by);",
        "CREATE INDEX IF NOT EXISTS idx_events_start_time ON events(start_time);",
        "CREATE INDEX IF NOT EXISTS idx_attendees_event_id ON attendees(event_id);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
