use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::{models::MediaUpload, value_objects::MediaRef};

/// A blob that has been written to the media store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Public URL the blob can be fetched from
    pub url: String,
    /// Opaque handle for later deletion
    pub storage_id: String,
    pub size: u64,
}

impl StoredMedia {
    pub fn media_ref(&self) -> MediaRef {
        MediaRef {
            url: self.url.clone(),
            storage_id: self.storage_id.clone(),
        }
    }
}

/// Blob contents read back from the store
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub data: Bytes,
    pub content_type: String,
}

/// Failures reported by a media store
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("media not found: {0}")]
    NotFound(String),
    #[error("invalid storage id: {0}")]
    InvalidId(String),
    #[error("media backend error: {0}")]
    Backend(String),
}

pub type MediaResult<T> = Result<T, MediaError>;

/// Port for the external blob store holding uploaded images
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Store a blob under `folder`, returning its URL and storage id.
    ///
    /// Never leaves a partial blob behind on failure.
    async fn upload(&self, upload: MediaUpload, folder: &str) -> MediaResult<StoredMedia>;

    /// Delete a blob; `NotFound` if it was already gone
    async fn delete(&self, storage_id: &str) -> MediaResult<()>;

    async fn fetch(&self, storage_id: &str) -> MediaResult<FetchedMedia>;
}
