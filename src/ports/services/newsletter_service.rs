use crate::domain::{
    errors::ContentResult,
    models::{Subscriber, Subscription},
    value_objects::EmailAddress,
};
use async_trait::async_trait;
use thiserror::Error;

#[async_trait]
pub trait NewsletterService: Send + Sync + 'static {
    /// Subscribe an address and send the welcome notice
    async fn subscribe(&self, email: &str) -> ContentResult<Subscription>;

    async fn list(&self) -> ContentResult<Vec<Subscriber>>;
}

#[derive(Debug, Clone, Error)]
#[error("welcome notice failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound port for the welcome notice sent to new subscribers
#[async_trait]
pub trait WelcomeNotifier: Send + Sync + 'static {
    async fn send_welcome(&self, email: &EmailAddress) -> Result<(), NotifyError>;
}
