use crate::domain::{
    errors::ContentResult,
    models::{
        BulkAction, GalleryStats, MediaUpload, Resource, ResourceFields, ResourcePage,
        ResourceQuery,
    },
    value_objects::{Collection, ResourceId},
};
use async_trait::async_trait;

/// Service port for ordered resource CRUD with owned media
#[async_trait]
pub trait ResourceService: Send + Sync + 'static {
    /// Validate and store a new resource, uploading its media first
    async fn create(
        &self,
        collection: Collection,
        fields: ResourceFields,
        media: Option<MediaUpload>,
    ) -> ContentResult<Resource>;

    async fn get(&self, collection: Collection, id: &ResourceId) -> ContentResult<Resource>;

    /// Partially update a resource, replacing its media when given
    async fn update(
        &self,
        collection: Collection,
        id: &ResourceId,
        fields: ResourceFields,
        media: Option<MediaUpload>,
    ) -> ContentResult<Resource>;

    /// Delete a resource and its owned blob
    async fn delete(&self, collection: Collection, id: &ResourceId) -> ContentResult<()>;

    /// Set status from its text form (`active` / `inactive`)
    async fn set_status(
        &self,
        collection: Collection,
        id: &ResourceId,
        status: &str,
    ) -> ContentResult<Resource>;

    /// Set one resource's order directly
    async fn set_order(
        &self,
        collection: Collection,
        id: &ResourceId,
        order: u32,
    ) -> ContentResult<Resource>;

    /// Public listing: active resources only
    async fn list_active(
        &self,
        collection: Collection,
        query: ResourceQuery,
    ) -> ContentResult<ResourcePage>;

    /// Admin listing: every resource regardless of status
    async fn list_all(
        &self,
        collection: Collection,
        query: ResourceQuery,
    ) -> ContentResult<ResourcePage>;

    async fn stats(&self, collection: Collection) -> ContentResult<GalleryStats>;

    /// Apply one action to many resources, returning how many were affected
    async fn bulk(
        &self,
        collection: Collection,
        ids: &[ResourceId],
        action: BulkAction,
    ) -> ContentResult<usize>;

    /// Count a view of a video, returning the new total
    async fn record_view(&self, collection: Collection, id: &ResourceId) -> ContentResult<u64>;
}
