use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{ContentResult, ValidationError},
        models::{now_micros, Subscriber},
        value_objects::EmailAddress,
    },
    ports::repositories::SubscriberRepository,
};

/// In-memory implementation of SubscriberRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemorySubscriberRepository {
    subscribers: Arc<RwLock<HashMap<EmailAddress, Subscriber>>>,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn insert(&self, email: EmailAddress) -> ContentResult<Subscriber> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.contains_key(&email) {
            return Err(ValidationError::AlreadySubscribed(email.to_string()).into());
        }

        let subscriber = Subscriber {
            email: email.clone(),
            subscribed_at: now_micros(),
        };
        subscribers.insert(email, subscriber.clone());
        Ok(subscriber)
    }

    async fn list(&self) -> ContentResult<Vec<Subscriber>> {
        let mut subscribers: Vec<Subscriber> =
            self.subscribers.read().await.values().cloned().collect();
        subscribers.sort_by(|a, b| {
            a.subscribed_at
                .cmp(&b.subscribed_at)
                .then_with(|| a.email.cmp(&b.email))
        });
        Ok(subscribers)
    }
}
