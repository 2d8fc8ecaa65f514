use crate::domain::{
    errors::ContentResult,
    models::Resource,
    value_objects::{Collection, ResourceId},
};
use async_trait::async_trait;

/// Service port for rewriting the display order of a collection
#[async_trait]
pub trait OrderingService: Send + Sync + 'static {
    /// Give each listed resource its position in `ids` as its order.
    ///
    /// Unlisted resources keep their order. Returns the whole collection
    /// in canonical order.
    async fn reorder(
        &self,
        collection: Collection,
        ids: &[ResourceId],
    ) -> ContentResult<Vec<Resource>>;
}
