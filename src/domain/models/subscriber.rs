use chrono::{DateTime, Utc};

use crate::domain::value_objects::EmailAddress;

/// A newsletter subscriber, unique by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub email: EmailAddress,
    pub subscribed_at: DateTime<Utc>,
}

/// Outcome of a newsletter signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub subscriber: Subscriber,
    /// Whether the welcome notice went out
    pub notified: bool,
}
