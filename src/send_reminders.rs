//! Sends reminder emails to everyone registered for an approved event that
//! starts on a given UTC day. Meant to run once a day from cron.
//!
//! ```text
//! send-reminders                    # events starting tomorrow
//! send-reminders --date 2025-03-10  # events starting on that day
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use color_eyre::eyre::{eyre, Result, WrapErr};
use dotenv::dotenv;
use eventhall_api::config::parse_log_level;
use eventhall_core::reminders::ReminderDispatcher;
use eventhall_db::{create_pool, PgStore};
use eventhall_mailer::{notifier_from_config, MailerConfig};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

fn target_date(args: &[String]) -> Result<NaiveDate> {
    let value = match args {
        [] => {
            return Utc::now()
                .date_naive()
                .succ_opt()
                .ok_or_else(|| eyre!("No day after today"));
        }
        [flag, value] if flag == "--date" => value.as_str(),
        [arg] => arg
            .strip_prefix("--date=")
            .ok_or_else(|| eyre!("Unknown argument {arg}"))?,
        _ => return Err(eyre!("Usage: send-reminders [--date YYYY-MM-DD]")),
    };

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .wrap_err_with(|| format!("Invalid date {value}, expected YYYY-MM-DD"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let date = target_date(&args)?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let store = Arc::new(PgStore::new(create_pool(&database_url).await?));
    let notifier = notifier_from_config(&MailerConfig::from_env()?)?;

    let dispatcher = ReminderDispatcher::new(store.clone(), store, notifier);

    info!("Sending reminders for events starting on {}", date);
    let report = dispatcher.send_reminders_for_day(date).await?;

    info!(
        "Reminders done: {} event(s), {} sent, {} failed",
        report.events, report.sent, report.failed
    );
    if report.failed > 0 {
        warn!("{} reminder(s) could not be delivered", report.failed);
    }

    Ok(())
}
