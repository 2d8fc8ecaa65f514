use crate::domain::{
    errors::ContentResult,
    models::LibraryImage,
    value_objects::{MediaRef, ResourceId},
};
use async_trait::async_trait;

/// Persistence for the standalone image library
#[async_trait]
pub trait ImageRepository: Send + Sync + 'static {
    async fn insert(&self, media: MediaRef, file_size: u64) -> ContentResult<LibraryImage>;

    async fn get(&self, id: &ResourceId) -> ContentResult<Option<LibraryImage>>;

    /// All images, newest first
    async fn list(&self) -> ContentResult<Vec<LibraryImage>>;

    /// Point an image at a new blob; `None` if the image is gone
    async fn replace_media(
        &self,
        id: &ResourceId,
        media: MediaRef,
        file_size: u64,
    ) -> ContentResult<Option<LibraryImage>>;

    async fn delete(&self, id: &ResourceId) -> ContentResult<bool>;
}
