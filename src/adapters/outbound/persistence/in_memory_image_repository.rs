use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::ContentResult,
        models::{next_update_timestamp, now_micros, sort_newest_first, LibraryImage},
        value_objects::{MediaRef, ResourceId},
    },
    ports::repositories::ImageRepository,
};

/// In-memory implementation of ImageRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryImageRepository {
    images: Arc<RwLock<HashMap<ResourceId, LibraryImage>>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn insert(&self, media: MediaRef, file_size: u64) -> ContentResult<LibraryImage> {
        let now = now_micros();
        let image = LibraryImage {
            id: ResourceId::generate(),
            media,
            file_size,
            created_at: now,
            updated_at: now,
        };

        self.images
            .write()
            .await
            .insert(image.id.clone(), image.clone());
        Ok(image)
    }

    async fn get(&self, id: &ResourceId) -> ContentResult<Option<LibraryImage>> {
        Ok(self.images.read().await.get(id).cloned())
    }

    async fn list(&self) -> ContentResult<Vec<LibraryImage>> {
        let mut images: Vec<LibraryImage> = self.images.read().await.values().cloned().collect();
        sort_newest_first(&mut images);
        Ok(images)
    }

    async fn replace_media(
        &self,
        id: &ResourceId,
        media: MediaRef,
        file_size: u64,
    ) -> ContentResult<Option<LibraryImage>> {
        let mut images = self.images.write().await;
        Ok(images.get_mut(id).map(|image| {
            image.media = media;
            image.file_size = file_size;
            image.updated_at = next_update_timestamp(image.updated_at);
            image.clone()
        }))
    }

    async fn delete(&self, id: &ResourceId) -> ContentResult<bool> {
        Ok(self.images.write().await.remove(id).is_some())
    }
}
