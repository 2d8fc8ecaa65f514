use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

const MAX_EMAIL_LEN: usize = 254;

/// A normalized (trimmed, lowercased) email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_lowercase();
        let invalid = || ValidationError::InvalidEmail(value.trim().to_string());

        if normalized.len() > MAX_EMAIL_LEN || normalized.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EmailAddress::new(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_email() {
        let email = EmailAddress::new("  Hello@DigiOraMedia.com ").unwrap();
        assert_eq!(email.as_str(), "hello@digioramedia.com");
    }

    #[test]
    fn test_rejects_invalid_email() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("no-at-sign").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@").is_err());
        assert!(EmailAddress::new("a b@example.com").is_err());
        assert!(EmailAddress::new("a@b@c").is_err());
    }
}
