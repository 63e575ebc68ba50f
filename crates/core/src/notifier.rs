//! Outbound notification seam.
//!
//! The managers hold an `Arc<dyn Notifier>` handed to them at construction.
//! Every call site treats delivery as best-effort: a failed send is logged
//! and never undoes the state change that triggered it. Sends made while
//! answering a request go through [`within_deadline`] so a stalled mail
//! server cannot hold the response.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use eyre::{eyre, Result};

use crate::models::event::EventSummary;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tells the organizer their event was approved and how attendees join.
    async fn send_approval_notice(&self, to: &str, event_name: &str, join_link: &str) -> Result<()>;

    /// Reminds a registered attendee about an upcoming event.
    async fn send_reminder_notice(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()>;

    async fn send_registration_confirmation(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()>;
}

/// Upper bound on a single send issued from a request path.
pub const SEND_DEADLINE: Duration = Duration::from_secs(5);

/// Awaits `send` for at most [`SEND_DEADLINE`]. A send that overruns is
/// dropped and reported as an error.
pub async fn within_deadline<F>(send: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    tokio::time::timeout(SEND_DEADLINE, send)
        .await
        .map_err(|_| eyre!("notification not delivered within {}s", SEND_DEADLINE.as_secs()))?
}
