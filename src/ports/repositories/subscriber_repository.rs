use crate::domain::{errors::ContentResult, models::Subscriber, value_objects::EmailAddress};
use async_trait::async_trait;

/// Newsletter subscribers, unique by email
#[async_trait]
pub trait SubscriberRepository: Send + Sync + 'static {
    /// Add a subscriber.
    ///
    /// Fails with `AlreadySubscribed` when the address is already present.
    async fn insert(&self, email: EmailAddress) -> ContentResult<Subscriber>;

    /// All subscribers, oldest first
    async fn list(&self) -> ContentResult<Vec<Subscriber>>;
}
