use async_trait::async_trait;
use eventhall_core::{models::event::EventSummary, notifier::Notifier};
use eyre::{Result, WrapErr};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use crate::{
    config::SmtpSettings,
    templates::{self, Email},
};

/// Sends notifications through an SMTP relay.
///
/// The transport is built once and reused; lettre pools connections for
/// the async transport.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings, from_name: &str) -> Result<Self> {
        let builder = if settings.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .wrap_err_with(|| format!("Invalid SMTP relay {}", settings.host))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user.clone(), settings.pass.clone()))
            .build();

        let address: Address = settings
            .user
            .parse()
            .wrap_err_with(|| format!("SMTP_USER {} is not a valid sender address", settings.user))?;

        Ok(Self {
            transport,
            from: Mailbox::new(Some(from_name.to_string()), address),
        })
    }

    pub fn sender(&self) -> &Mailbox {
        &self.from
    }

    /// Builds the message without sending it.
    pub fn compose(&self, to: &str, email: Email) -> Result<Message> {
        let to: Mailbox = to
            .parse()
            .wrap_err_with(|| format!("Invalid recipient address {to}"))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)
            .wrap_err("Failed to build email")?;

        Ok(message)
    }

    async fn deliver(&self, to: &str, email: Email) -> Result<()> {
        let message = self.compose(to, email)?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!("Email sent successfully to {}", to);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send email to {}: {}", to, e);
                Err(e).wrap_err_with(|| format!("Failed to send email to {to}"))
            }
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_approval_notice(&self, to: &str, event_name: &str, join_link: &str) -> Result<()> {
        self.deliver(to, templates::approval(event_name, join_link)).await
    }

    async fn send_reminder_notice(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()> {
        self.deliver(to, templates::reminder(attendee_name, event)).await
    }

    async fn send_registration_confirmation(
        &self,
        to: &str,
        attendee_name: &str,
        event: &EventSummary,
    ) -> Result<()> {
        self.deliver(to, templates::registration_confirmation(attendee_name, event))
            .await
    }
}
