//! # Eventhall Mailer
//!
//! [`Notifier`] implementations: [`SmtpNotifier`] delivers through an SMTP
//! relay with lettre, [`LogNotifier`] only writes the message to the log.

pub mod config;
pub mod log;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use eventhall_core::notifier::Notifier;
use eyre::Result;
use tracing::{info, warn};

pub use config::{MailerConfig, SmtpSettings};
pub use log::LogNotifier;
pub use smtp::SmtpNotifier;

/// Picks the notifier for the given configuration.
pub fn notifier_from_config(config: &MailerConfig) -> Result<Arc<dyn Notifier>> {
    match &config.smtp {
        Some(settings) => {
            info!("Sending mail through {}:{}", settings.host, settings.port);
            Ok(Arc::new(SmtpNotifier::new(settings, &config.from_name)?))
        }
        None => {
            warn!("SMTP_HOST is not set; outgoing mail will only be logged");
            Ok(Arc::new(LogNotifier::new()))
        }
    }
}
