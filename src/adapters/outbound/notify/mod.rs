use async_trait::async_trait;
use tracing::info;

use crate::{
    domain::value_objects::EmailAddress,
    ports::services::{NotifyError, WelcomeNotifier},
};

/// Welcome notifier that only records the notice in the log.
///
/// Stands in for a mail relay, which lives outside this service.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl WelcomeNotifier for LoggingNotifier {
    async fn send_welcome(&self, email: &EmailAddress) -> Result<(), NotifyError> {
        info!(%email, "newsletter welcome notice sent");
        Ok(())
    }
}
