use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{ContentError, ContentResult, ValidationError},
        models::{
            next_order, BulkAction, GalleryStats, MediaUpload, PageRequest, Pagination, Resource,
            ResourceDetails, ResourceDraft, ResourceFields, ResourceFilter, ResourcePage,
            ResourceQuery,
        },
        value_objects::{Collection, ResourceId, ResourceStatus},
    },
    ports::{
        repositories::ResourceRepository,
        services::ResourceService,
        storage::{MediaError, MediaStore, StoredMedia},
    },
};

/// Resource CRUD over a document store and a media store.
///
/// Blob writes always happen before the record write that references them,
/// so a failure can leave an orphaned blob but never a record pointing at a
/// missing one.
#[derive(Clone)]
pub struct ResourceServiceImpl {
    repository: Arc<dyn ResourceRepository>,
    media: Arc<dyn MediaStore>,
}

impl ResourceServiceImpl {
    pub fn new(repository: Arc<dyn ResourceRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self { repository, media }
    }

    async fn find(&self, collection: Collection, id: &ResourceId) -> ContentResult<Resource> {
        self.repository
            .get(collection, id)
            .await?
            .ok_or_else(|| ContentError::not_found(collection, id))
    }

    async fn upload(
        &self,
        collection: Collection,
        upload: MediaUpload,
    ) -> ContentResult<StoredMedia> {
        upload.validate()?;
        let stored = self
            .media
            .upload(upload, collection.media_folder())
            .await
            .map_err(|e| ContentError::storage("upload", e))?;
        debug!(%collection, storage_id = %stored.storage_id, "media uploaded");
        Ok(stored)
    }

    /// Delete the blob a resource owns. An already-missing blob is tolerated.
    async fn release_media(&self, resource: &Resource) -> ContentResult<()> {
        let Some(media) = &resource.media else {
            return Ok(());
        };

        match self.media.delete(&media.storage_id).await {
            Ok(()) => Ok(()),
            Err(MediaError::NotFound(storage_id)) => {
                warn!(
                    collection = %resource.collection,
                    id = %resource.id,
                    %storage_id,
                    "media already absent, deleting record anyway"
                );
                Ok(())
            }
            Err(e) => Err(ContentError::storage("delete", e)),
        }
    }

    async fn remove(&self, resource: &Resource) -> ContentResult<()> {
        self.release_media(resource).await?;
        if !self
            .repository
            .delete(resource.collection, &resource.id)
            .await?
        {
            return Err(ContentError::not_found(resource.collection, &resource.id));
        }
        Ok(())
    }

    async fn insert(
        &self,
        draft: ResourceDraft,
        stored: Option<&StoredMedia>,
    ) -> ContentResult<Resource> {
        let order = match draft.order {
            Some(order) => order,
            None => next_order(self.repository.max_order(draft.collection).await?),
        };
        let media = stored.map(|s| (s.media_ref(), s.size));
        self.repository
            .insert(draft.into_new_resource(order, media))
            .await
    }

    async fn list(
        &self,
        collection: Collection,
        filter: ResourceFilter,
        query: &ResourceQuery,
    ) -> ContentResult<ResourcePage> {
        let page = query
            .limit
            .or(collection.default_page_limit())
            .map(|limit| PageRequest::new(query.page, limit))
            .transpose()?;

        let items = self.repository.list(collection, &filter, page).await?;
        let pagination = match page {
            Some(page) => Some(Pagination::new(
                page,
                self.repository.count(collection, &filter).await?,
            )),
            None => None,
        };

        Ok(ResourcePage { items, pagination })
    }
}

#[async_trait]
impl ResourceService for ResourceServiceImpl {
    async fn create(
        &self,
        collection: Collection,
        fields: ResourceFields,
        media: Option<MediaUpload>,
    ) -> ContentResult<Resource> {
        let draft = ResourceDraft::from_fields(collection, fields)?;
        if collection == Collection::Gallery && media.is_none() {
            return Err(ValidationError::MediaRequired("Image").into());
        }

        let stored = match media {
            Some(upload) => Some(self.upload(collection, upload).await?),
            None => None,
        };

        let resource = match self.insert(draft, stored.as_ref()).await {
            Ok(resource) => resource,
            Err(e) => {
                if let Some(stored) = &stored {
                    warn!(
                        %collection,
                        storage_id = %stored.storage_id,
                        error = %e,
                        "record insert failed, uploaded media is orphaned"
                    );
                }
                return Err(e);
            }
        };

        info!(%collection, id = %resource.id, order = resource.order, "resource created");
        Ok(resource)
    }

    async fn get(&self, collection: Collection, id: &ResourceId) -> ContentResult<Resource> {
        self.find(collection, id).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &ResourceId,
        fields: ResourceFields,
        media: Option<MediaUpload>,
    ) -> ContentResult<Resource> {
        let mut resource = self.find(collection, id).await?;
        resource.apply_fields(fields)?;

        if let Some(upload) = media {
            let stored = self.upload(collection, upload).await?;

            if let Some(old) = &resource.media {
                if let Err(e) = self.media.delete(&old.storage_id).await {
                    warn!(
                        %collection,
                        %id,
                        storage_id = %stored.storage_id,
                        "replacing media failed, new upload is orphaned"
                    );
                    return Err(ContentError::storage("delete", e));
                }
            }

            let media_ref = stored.media_ref();
            resource.details.attach_media(&media_ref, stored.size);
            resource.media = Some(media_ref);
        }

        let updated = self.repository.update(&resource).await?;
        info!(%collection, %id, "resource updated");
        Ok(updated)
    }

    async fn delete(&self, collection: Collection, id: &ResourceId) -> ContentResult<()> {
        let resource = self.find(collection, id).await?;
        self.remove(&resource).await?;
        info!(%collection, %id, "resource deleted");
        Ok(())
    }

    async fn set_status(
        &self,
        collection: Collection,
        id: &ResourceId,
        status: &str,
    ) -> ContentResult<Resource> {
        let status: ResourceStatus = status.parse()?;
        let mut resource = self.find(collection, id).await?;
        resource.status = status;
        let updated = self.repository.update(&resource).await?;
        info!(%collection, %id, status = status.as_str(), "resource status changed");
        Ok(updated)
    }

    async fn set_order(
        &self,
        collection: Collection,
        id: &ResourceId,
        order: u32,
    ) -> ContentResult<Resource> {
        let mut resource = self.find(collection, id).await?;
        resource.order = order;
        self.repository.update(&resource).await
    }

    async fn list_active(
        &self,
        collection: Collection,
        query: ResourceQuery,
    ) -> ContentResult<ResourcePage> {
        let filter = ResourceFilter {
            status: Some(ResourceStatus::Active),
            ..query.filter.clone()
        };
        self.list(collection, filter, &query).await
    }

    async fn list_all(
        &self,
        collection: Collection,
        query: ResourceQuery,
    ) -> ContentResult<ResourcePage> {
        self.list(collection, query.filter.clone(), &query).await
    }

    async fn stats(&self, collection: Collection) -> ContentResult<GalleryStats> {
        let resources = self
            .repository
            .list(collection, &ResourceFilter::default(), None)
            .await?;
        Ok(GalleryStats::from_resources(&resources))
    }

    async fn bulk(
        &self,
        collection: Collection,
        ids: &[ResourceId],
        action: BulkAction,
    ) -> ContentResult<usize> {
        if ids.is_empty() {
            return Err(ValidationError::EmptyIdList.into());
        }

        let mut affected = 0;
        for id in ids {
            let Some(mut resource) = self.repository.get(collection, id).await? else {
                debug!(%collection, %id, "bulk action skipped unknown id");
                continue;
            };

            match action {
                BulkAction::Status(status) => {
                    resource.status = status;
                    self.repository.update(&resource).await?;
                }
                BulkAction::Category(new_category) => {
                    if let ResourceDetails::Gallery { category, .. } = &mut resource.details {
                        *category = new_category;
                    }
                    self.repository.update(&resource).await?;
                }
                BulkAction::Delete => self.remove(&resource).await?,
            }
            affected += 1;
        }

        info!(%collection, ?action, affected, "bulk action applied");
        Ok(affected)
    }

    async fn record_view(&self, collection: Collection, id: &ResourceId) -> ContentResult<u64> {
        self.repository
            .increment_views(collection, id)
            .await?
            .ok_or_else(|| ContentError::not_found(collection, id))
    }
}

/// Builder for ResourceServiceImpl
#[derive(Default)]
pub struct ResourceServiceBuilder {
    repository: Option<Arc<dyn ResourceRepository>>,
    media: Option<Arc<dyn MediaStore>>,
}

impl ResourceServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn ResourceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn media(mut self, media: Arc<dyn MediaStore>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn build(self) -> Result<ResourceServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let media = self.media.ok_or("Media store is required")?;

        Ok(ResourceServiceImpl::new(repository, media))
    }
}
