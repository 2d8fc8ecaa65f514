use crate::domain::{
    errors::ContentResult,
    models::{NewResource, PageRequest, Resource, ResourceFilter},
    value_objects::{Collection, ResourceId},
};
use async_trait::async_trait;

/// Document store for ordered resources.
///
/// Implementations own id and timestamp assignment. Every write that
/// changes a record must leave its `updated_at` strictly later than before.
#[async_trait]
pub trait ResourceRepository: Send + Sync + 'static {
    /// Insert a new record, assigning its id and timestamps
    async fn insert(&self, resource: NewResource) -> ContentResult<Resource>;

    async fn get(&self, collection: Collection, id: &ResourceId)
        -> ContentResult<Option<Resource>>;

    /// Overwrite the mutable fields of an existing record.
    ///
    /// Returns `NotFound` if the record no longer exists.
    async fn update(&self, resource: &Resource) -> ContentResult<Resource>;

    /// Remove a record; `false` if it did not exist
    async fn delete(&self, collection: Collection, id: &ResourceId) -> ContentResult<bool>;

    /// Matching records in canonical order, optionally paged
    async fn list(
        &self,
        collection: Collection,
        filter: &ResourceFilter,
        page: Option<PageRequest>,
    ) -> ContentResult<Vec<Resource>>;

    async fn count(&self, collection: Collection, filter: &ResourceFilter) -> ContentResult<usize>;

    /// Highest `order` in the collection, `None` when it is empty
    async fn max_order(&self, collection: Collection) -> ContentResult<Option<u32>>;

    /// Set the order of several records as one unit.
    ///
    /// Either every listed record is updated or, if any id is missing,
    /// none is and `NotFound` is returned.
    async fn apply_orders(
        &self,
        collection: Collection,
        orders: &[(ResourceId, u32)],
    ) -> ContentResult<()>;

    /// Bump a video's view counter, returning the new count
    async fn increment_views(
        &self,
        collection: Collection,
        id: &ResourceId,
    ) -> ContentResult<Option<u64>>;
}
