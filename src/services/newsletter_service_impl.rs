use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    domain::{
        errors::ContentResult,
        models::{Subscriber, Subscription},
        value_objects::EmailAddress,
    },
    ports::{
        repositories::SubscriberRepository,
        services::{NewsletterService, WelcomeNotifier},
    },
};

/// Newsletter signups. A failed welcome notice is reported, not raised.
#[derive(Clone)]
pub struct NewsletterServiceImpl {
    repository: Arc<dyn SubscriberRepository>,
    notifier: Arc<dyn WelcomeNotifier>,
}

impl NewsletterServiceImpl {
    pub fn new(
        repository: Arc<dyn SubscriberRepository>,
        notifier: Arc<dyn WelcomeNotifier>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

#[async_trait]
impl NewsletterService for NewsletterServiceImpl {
    async fn subscribe(&self, email: &str) -> ContentResult<Subscription> {
        let email = EmailAddress::new(email)?;
        let subscriber = self.repository.insert(email).await?;
        info!(email = %subscriber.email, "newsletter subscription added");

        let notified = match self.notifier.send_welcome(&subscriber.email).await {
            Ok(()) => true,
            Err(e) => {
                warn!(email = %subscriber.email, error = %e, "welcome notice not sent");
                false
            }
        };

        Ok(Subscription {
            subscriber,
            notified,
        })
    }

    async fn list(&self) -> ContentResult<Vec<Subscriber>> {
        self.repository.list().await
    }
}
