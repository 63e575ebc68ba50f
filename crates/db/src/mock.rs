pub mod repositories;

pub use repositories::{MockAttendeeRepo, MockEventRepo, MockNotifier};

/// Connects to `TEST_DATABASE_URL` and prepares the schema. Returns `None`
/// when the variable is unset so database tests can be skipped locally.
pub async fn create_test_pool() -> eyre::Result<Option<crate::DbPool>> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        return Ok(None);
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    // Initialize test schema
    crate::schema::initialize_database(&pool).await?;

    Ok(Some(pool))
}
