use crate::domain::{
    errors::ContentResult,
    models::{LibraryImage, MediaUpload},
    value_objects::ResourceId,
};
use async_trait::async_trait;

/// Service port for the standalone image library
#[async_trait]
pub trait ImageLibrary: Send + Sync + 'static {
    /// Store the blob, then record it
    async fn upload(&self, upload: MediaUpload) -> ContentResult<LibraryImage>;

    async fn list(&self) -> ContentResult<Vec<LibraryImage>>;

    async fn get(&self, id: &ResourceId) -> ContentResult<LibraryImage>;

    /// Swap the image's blob for a new upload, deleting the old one
    async fn replace(&self, id: &ResourceId, upload: MediaUpload) -> ContentResult<LibraryImage>;

    /// Delete the blob and the record
    async fn delete(&self, id: &ResourceId) -> ContentResult<()>;
}
