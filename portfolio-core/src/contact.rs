use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::ContactError;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// A contact-form submission as posted by the site. Missing and `null`
/// fields both read as blank so that `validate` reports them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactMessage {
    #[serde(deserialize_with = "null_as_blank")]
    pub name: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub email: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub message: String,
}

fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Subject and plain-text body ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub reply_to_name: String,
    pub reply_to_email: String,
    pub subject: String,
    pub body: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ContactError::MissingField);
        }
        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }

    /// Validates, then builds the notification sent to the site owner.
    pub fn compose(&self) -> Result<ContactEmail, ContactError> {
        self.validate()?;
        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        Ok(ContactEmail {
            reply_to_name: name.to_owned(),
            reply_to_email: email.to_owned(),
            subject: format!("Portfolio Contact: {subject}"),
            body: format!(
                "Name: {name}\nEmail: {email}\nSubject: {subject}\n\nMessage:\n{}",
                self.message
            ),
        })
    }
}
