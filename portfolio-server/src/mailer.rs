use std::env;

use anyhow::{Context, Result};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_core::ContactEmail;

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

impl MailSettings {
    /// `None` when `EMAIL_USER` or `EMAIL_PASSWORD` is missing; the contact
    /// endpoint then reports delivery failures.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let username = get("EMAIL_USER")?;
        let password = get("EMAIL_PASSWORD")?;
        Some(Self {
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned()),
            smtp_port: get("SMTP_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            recipient: get("CONTACT_RECIPIENT").unwrap_or_else(|| username.clone()),
            username,
            password,
        })
    }
}

/// Delivers contact-form notifications to the site owner over SMTP.
pub struct ContactMailer {
    from: Mailbox,
    recipient: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl ContactMailer {
    pub fn build(settings: MailSettings) -> Result<Self> {
        let sender: Address = settings
            .username
            .parse()
            .with_context(|| format!("invalid sender address: {}", settings.username))?;
        let recipient: Address = settings
            .recipient
            .parse()
            .with_context(|| format!("invalid recipient address: {}", settings.recipient))?;

        let credentials = Credentials::new(settings.username.clone(), settings.password);
        let builder = if settings.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
                .with_context(|| format!("invalid smtp relay host: {}", settings.smtp_host))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
                .with_context(|| format!("invalid smtp starttls host: {}", settings.smtp_host))?
        };
        let transport = builder
            .port(settings.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            from: Mailbox::new(Some("Portfolio".to_owned()), sender),
            recipient: Mailbox::new(None, recipient),
            transport,
        })
    }

    pub async fn send(&self, email: &ContactEmail) -> Result<()> {
        let reply_to: Address = email
            .reply_to_email
            .parse()
            .with_context(|| format!("invalid visitor address: {}", email.reply_to_email))?;
        let message = Message::builder()
            .from(self.from.clone())
            .reply_to(Mailbox::new(Some(email.reply_to_name.clone()), reply_to))
            .to(self.recipient.clone())
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .context("failed to build email message")?;
        self.transport
            .send(message)
            .await
            .context("failed to send email via SMTP")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn mail_disabled_without_credentials() {
        assert_eq!(MailSettings::from_lookup(lookup(&[("EMAIL_USER", "me@example.com")])), None);
    }

    #[test]
    fn recipient_defaults_to_account() {
        let settings = MailSettings::from_lookup(lookup(&[
            ("EMAIL_USER", "me@example.com"),
            ("EMAIL_PASSWORD", "app-password"),
            ("SMTP_PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(settings.recipient, "me@example.com");
        assert_eq!(settings.smtp_host, "smtp.gmail.com");
        assert_eq!(settings.smtp_port, 587);
    }
}
