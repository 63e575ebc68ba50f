use async_trait::async_trait;
use eventhall_core::{models::event::EventSummary, notifier::Notifier};
use eyre::Result;
use tracing::info;

use crate::templates;

/// Logs outgoing mail instead of sending it. Used when no SMTP relay is
/// configured.
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_approval_notice(&self, to: &str, event_name: &str, join_link: &str) -> Result<()> {
        let email = templates::approval(event_name, join_link);
        info!(to = %to, subject = %email.subject, join_link = %join_link, "Approval email (not sent)");
        Ok(())
    }

    async fn send_reminder_notice(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()> {
        let email = templates::reminder(attendee_name, event);
        info!(to = %to, subject = %email.subject, start = %event.start, "Reminder email (not sent)");
        Ok(())
    }

    async fn send_registration_confirmation(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()> {
        let email = templates::registration_confirmation(attendee_name, event);
        info!(to = %to, subject = %email.subject, "Registration email (not sent)");
        Ok(())
    }
}
