use crate::domain::{
    errors::ContentResult,
    models::{Contact, ContactStatus, NewContact},
    value_objects::ResourceId,
};
use async_trait::async_trait;

/// Persistence for contact form submissions
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    async fn insert(&self, contact: NewContact) -> ContentResult<Contact>;

    async fn get(&self, id: &ResourceId) -> ContentResult<Option<Contact>>;

    /// All submissions, newest first
    async fn list(&self) -> ContentResult<Vec<Contact>>;

    async fn set_status(
        &self,
        id: &ResourceId,
        status: ContactStatus,
    ) -> ContentResult<Option<Contact>>;

    async fn delete(&self, id: &ResourceId) -> ContentResult<bool>;
}
