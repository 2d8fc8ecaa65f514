use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    domain::{
        errors::{ContentError, ContentResult},
        models::{LibraryImage, MediaUpload, IMAGE_LIBRARY_FOLDER},
        value_objects::ResourceId,
    },
    ports::{
        repositories::ImageRepository,
        services::ImageLibrary,
        storage::{MediaError, MediaStore, StoredMedia},
    },
};

/// Image library over a document store and a media store.
///
/// Follows the same write order as collection resources: the new blob is
/// stored before any record points at it.
#[derive(Clone)]
pub struct ImageLibraryImpl {
    repository: Arc<dyn ImageRepository>,
    media: Arc<dyn MediaStore>,
}

impl ImageLibraryImpl {
    pub fn new(repository: Arc<dyn ImageRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { repository, media }
    }

    async fn find(&self, id: &ResourceId) -> ContentResult<LibraryImage> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn store(&self, upload: MediaUpload) -> ContentResult<StoredMedia> {
        upload.validate()?;
        self.media
            .upload(upload, IMAGE_LIBRARY_FOLDER)
            .await
            .map_err(|e| ContentError::storage("upload", e))
    }
}

fn not_found(id: &ResourceId) -> ContentError {
    ContentError::ImageNotFound { id: id.to_string() }
}

#[async_trait]
impl ImageLibrary for ImageLibraryImpl {
    async fn upload(&self, upload: MediaUpload) -> ContentResult<LibraryImage> {
        let stored = self.store(upload).await?;

        let image = self
            .repository
            .insert(stored.media_ref(), stored.size)
            .await
            .inspect_err(|e| {
                warn!(
                    storage_id = %stored.storage_id,
                    error = %e,
                    "image insert failed, uploaded media is orphaned"
                );
            })?;

        info!(id = %image.id, storage_id = %image.media.storage_id, "image uploaded");
        Ok(image)
    }

    async fn list(&self) -> ContentResult<Vec<LibraryImage>> {
        self.repository.list().await
    }

    async fn get(&self, id: &ResourceId) -> ContentResult<LibraryImage> {
        self.find(id).await
    }

    async fn replace(&self, id: &ResourceId, upload: MediaUpload) -> ContentResult<LibraryImage> {
        let image = self.find(id).await?;
        let stored = self.store(upload).await?;

        if let Err(e) = self.media.delete(&image.media.storage_id).await {
            warn!(
                %id,
                storage_id = %stored.storage_id,
                "replacing image failed, new upload is orphaned"
            );
            return Err(ContentError::storage("delete", e));
        }

        let Some(replaced) = self
            .repository
            .replace_media(id, stored.media_ref(), stored.size)
            .await?
        else {
            warn!(%id, storage_id = %stored.storage_id, "image vanished during replace");
            return Err(not_found(id));
        };

        info!(%id, storage_id = %replaced.media.storage_id, "image replaced");
        Ok(replaced)
    }

    async fn delete(&self, id: &ResourceId) -> ContentResult<()> {
        let image = self.find(id).await?;

        match self.media.delete(&image.media.storage_id).await {
            Ok(()) => {}
            Err(MediaError::NotFound(storage_id)) => {
                warn!(%id, %storage_id, "media already absent, deleting image anyway");
            }
            Err(e) => return Err(ContentError::storage("delete", e)),
        }

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        info!(%id, "image deleted");
        Ok(())
    }
}
