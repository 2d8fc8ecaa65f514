use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::{
    domain::{
        errors::{ContentError, ContentResult},
        models::{Contact, ContactStatus, ContactSubmission, NewContact},
        value_objects::ResourceId,
    },
    ports::{repositories::ContactRepository, services::ContactService},
};

#[derive(Clone)]
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
}

impl ContactServiceImpl {
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }
}

fn not_found(id: &ResourceId) -> ContentError {
    ContentError::ContactNotFound { id: id.to_string() }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn submit(&self, submission: ContactSubmission) -> ContentResult<Contact> {
        let contact = NewContact::try_from(submission)?;
        let stored = self.repository.insert(contact).await?;
        info!(id = %stored.id, "contact submission received");
        Ok(stored)
    }

    async fn list(&self) -> ContentResult<Vec<Contact>> {
        self.repository.list().await
    }

    async fn get(&self, id: &ResourceId) -> ContentResult<Contact> {
        self.repository.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn set_status(&self, id: &ResourceId, status: &str) -> ContentResult<Contact> {
        let status: ContactStatus = status.parse()?;
        self.repository
            .set_status(id, status)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: &ResourceId) -> ContentResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        info!(%id, "contact deleted");
        Ok(())
    }
}
