use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::ContentResult,
        models::{next_update_timestamp, now_micros, Contact, ContactStatus, NewContact},
        value_objects::ResourceId,
    },
    ports::repositories::ContactRepository,
};

/// In-memory implementation of ContactRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryContactRepository {
    contacts: Arc<RwLock<HashMap<ResourceId, Contact>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, new: NewContact) -> ContentResult<Contact> {
        let now = now_micros();
        let contact = Contact {
            id: ResourceId::generate(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            service: new.service,
            budget: new.budget,
            message: new.message,
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        };

        self.contacts
            .write()
            .await
            .insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    async fn get(&self, id: &ResourceId) -> ContentResult<Option<Contact>> {
        Ok(self.contacts.read().await.get(id).cloned())
    }

    async fn list(&self) -> ContentResult<Vec<Contact>> {
        let mut contacts: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(contacts)
    }

    async fn set_status(
        &self,
        id: &ResourceId,
        status: ContactStatus,
    ) -> ContentResult<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.get_mut(id).map(|contact| {
            contact.status = status;
            contact.updated_at = next_update_timestamp(contact.updated_at);
            contact.clone()
        }))
    }

    async fn delete(&self, id: &ResourceId) -> ContentResult<bool> {
        Ok(self.contacts.write().await.remove(id).is_some())
    }
}
