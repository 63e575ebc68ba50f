use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use eventhall_api::{config::ApiConfig, init_tracing, ApiState};
use eventhall_core::{auth::AdminKey, join_link::JoinLinks};
use eventhall_db::{create_pool, schema::initialize_database, PgStore};
use eventhall_mailer::{notifier_from_config, MailerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    let mailer_config = MailerConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgStore::new(db_pool));
    let state = Arc::new(ApiState::new(
        store.clone(),
        store,
        notifier_from_config(&mailer_config)?,
        JoinLinks::new(&config.public_base_url),
        AdminKey::from_hash(&config.admin_key_hash)?,
    ));

    // Start API server
    eventhall_api::start_server(config, state).await?;

    Ok(())
}
