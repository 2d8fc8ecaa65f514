use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{
    errors::ValidationError,
    value_objects::{EmailAddress, ResourceId},
};

const MAX_NAME_LEN: usize = 100;
const MAX_MESSAGE_LEN: usize = 5000;

/// Follow-up state of a contact form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Replied => "replied",
            ContactStatus::Archived => "archived",
        }
    }
}

impl FromStr for ContactStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(ContactStatus::New),
            "read" => Ok(ContactStatus::Read),
            "replied" => Ok(ContactStatus::Replied),
            "archived" => Ok(ContactStatus::Archived),
            other => Err(ValidationError::InvalidContactStatus(other.to_string())),
        }
    }
}

/// A stored contact form submission
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ResourceId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw contact form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
}

/// Validated contact submission ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: String,
}

impl TryFrom<ContactSubmission> for NewContact {
    type Error = ValidationError;

    fn try_from(input: ContactSubmission) -> Result<Self, Self::Error> {
        let email = input
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(ValidationError::MissingField("Email"))?;

        Ok(NewContact {
            first_name: required("First name", input.first_name, MAX_NAME_LEN)?,
            last_name: required("Last name", input.last_name, MAX_NAME_LEN)?,
            email: EmailAddress::new(email)?,
            phone: optional(input.phone),
            company: optional(input.company),
            service: optional(input.service),
            budget: optional(input.budget),
            message: required("Message", input.message, MAX_MESSAGE_LEN)?,
        })
    }
}

fn required(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = optional(value).ok_or(ValidationError::MissingField(field))?;
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::FieldTooLong {
            field,
            actual: len,
            max,
        });
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("Ada@Example.com".to_string()),
            company: Some("  ".to_string()),
            message: Some("We need a new brand".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_submission() {
        let contact = NewContact::try_from(submission()).unwrap();
        assert_eq!(contact.email.as_str(), "ada@example.com");
        assert_eq!(contact.company, None);
    }

    #[test]
    fn test_missing_message() {
        let mut input = submission();
        input.message = None;
        assert_eq!(
            NewContact::try_from(input),
            Err(ValidationError::MissingField("Message"))
        );
    }

    #[test]
    fn test_invalid_email() {
        let mut input = submission();
        input.email = Some("not-an-email".to_string());
        assert!(matches!(
            NewContact::try_from(input),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_contact_status_parse() {
        assert_eq!("replied".parse::<ContactStatus>().unwrap(), ContactStatus::Replied);
        assert!("spam".parse::<ContactStatus>().is_err());
    }
}
