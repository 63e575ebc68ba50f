//! Mail delivery settings.
//!
//! - `SMTP_HOST`: relay host; when unset, mail is logged instead of sent
//! - `SMTP_PORT`: relay port (default: 587, implicit TLS on 465)
//! - `SMTP_USER` / `SMTP_PASS`: relay credentials, the user doubles as sender
//! - `MAIL_FROM_NAME`: sender display name (default: "Event Manager")

use eyre::{eyre, Result, WrapErr};
use std::env;

pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_FROM_NAME: &str = "Event Manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl SmtpSettings {
    /// Port 465 speaks TLS from the first byte; anything else upgrades with STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    pub smtp: Option<SmtpSettings>,
    pub from_name: String,
}

impl MailerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, treating blank values as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let from_name = get("MAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());

        let smtp = match get("SMTP_HOST") {
            Some(host) => {
                let port = match get("SMTP_PORT") {
                    Some(port) => port.parse().wrap_err("Invalid SMTP_PORT value")?,
                    None => DEFAULT_SMTP_PORT,
                };
                let user =
                    get("SMTP_USER").ok_or_else(|| eyre!("SMTP_USER must be set when SMTP_HOST is"))?;
                let pass = lookup("SMTP_PASS").unwrap_or_default();

                Some(SmtpSettings { host, port, user, pass })
            }
            None => None,
        };

        Ok(Self { smtp, from_name })
    }
}
