use crate::domain::{
    errors::ContentResult,
    models::{Contact, ContactSubmission},
    value_objects::ResourceId,
};
use async_trait::async_trait;

#[async_trait]
pub trait ContactService: Send + Sync + 'static {
    async fn submit(&self, submission: ContactSubmission) -> ContentResult<Contact>;

    async fn list(&self) -> ContentResult<Vec<Contact>>;

    async fn get(&self, id: &ResourceId) -> ContentResult<Contact>;

    async fn set_status(&self, id: &ResourceId, status: &str) -> ContentResult<Contact>;

    async fn delete(&self, id: &ResourceId) -> ContentResult<()>;
}
