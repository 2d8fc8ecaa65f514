use async_trait::async_trait;
use object_store::{path::Path as ObjectPath, ObjectStore as ApacheObjectStore, PutPayload};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::models::{content_type_for, MediaUpload},
    ports::storage::{FetchedMedia, MediaError, MediaResult, MediaStore, StoredMedia},
};

/// Where uploaded media lands and how it is addressed publicly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSettings {
    /// Top-level folder every storage id starts with
    pub prefix: String,
    /// Base URL that `{base}/{storage_id}` resolves against
    pub public_base_url: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            prefix: "digiora".to_string(),
            public_base_url: "http://localhost:3000/media".to_string(),
        }
    }
}

/// MediaStore backed by any `object_store` implementation
pub struct ObjectStoreMediaAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    settings: MediaSettings,
}

impl ObjectStoreMediaAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>, settings: MediaSettings) -> Self {
        Self {
            inner: store,
            settings,
        }
    }

    /// Public URL for a storage id
    pub fn url_for(&self, storage_id: &str) -> String {
        format!(
            "{}/{}",
            self.settings.public_base_url.trim_end_matches('/'),
            storage_id
        )
    }

    fn new_storage_id(&self, folder: &str, extension: &str) -> String {
        let name = format!("{}.{}", Uuid::new_v4(), extension);
        [self.settings.prefix.as_str(), folder, name.as_str()]
            .iter()
            .map(|part| part.trim_matches('/'))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn path(storage_id: &str) -> MediaResult<ObjectPath> {
        ObjectPath::parse(storage_id)
            .ok()
            .filter(|path| path.parts().count() > 0)
            .ok_or_else(|| MediaError::InvalidId(storage_id.to_string()))
    }
}

fn backend_error(operation: &str, err: object_store::Error) -> MediaError {
    MediaError::Backend(format!("Failed to {} media: {}", operation, err))
}

#[async_trait]
impl MediaStore for ObjectStoreMediaAdapter {
    async fn upload(&self, upload: MediaUpload, folder: &str) -> MediaResult<StoredMedia> {
        let storage_id = self.new_storage_id(folder, upload.extension());
        let path = Self::path(&storage_id)?;
        let size = upload.size();

        self.inner
            .put(&path, PutPayload::from(upload.data))
            .await
            .map_err(|e| backend_error("upload", e))?;

        Ok(StoredMedia {
            url: self.url_for(&storage_id),
            storage_id,
            size,
        })
    }

    async fn delete(&self, storage_id: &str) -> MediaResult<()> {
        let path = Self::path(storage_id)?;

        // Some backends treat deleting a missing object as success
        match self.inner.head(&path).await {
            Ok(_) => {}
            Err(object_store::Error::NotFound { .. }) => {
                return Err(MediaError::NotFound(storage_id.to_string()));
            }
            Err(e) => return Err(backend_error("inspect", e)),
        }

        self.inner.delete(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => MediaError::NotFound(storage_id.to_string()),
            _ => backend_error("delete", e),
        })
    }

    async fn fetch(&self, storage_id: &str) -> MediaResult<FetchedMedia> {
        let path = Self::path(storage_id)?;

        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => MediaError::NotFound(storage_id.to_string()),
            _ => backend_error("fetch", e),
        })?;

        let data = result
            .bytes()
            .await
            .map_err(|e| backend_error("read", e))?;

        Ok(FetchedMedia {
            data,
            content_type: content_type_for(storage_id).to_string(),
        })
    }
}
