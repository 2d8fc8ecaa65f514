use async_trait::async_trait;
use futures::future::try_join_all;
use std::{collections::HashSet, sync::Arc};
use tracing::info;

use crate::{
    domain::{
        errors::{ContentError, ContentResult, ValidationError},
        models::{Resource, ResourceFilter},
        value_objects::{Collection, ResourceId},
    },
    ports::{repositories::ResourceRepository, services::OrderingService},
};

/// Rewrites collection order from an explicit list of ids
#[derive(Clone)]
pub struct OrderingServiceImpl {
    repository: Arc<dyn ResourceRepository>,
}

impl OrderingServiceImpl {
    pub fn new(repository: Arc<dyn ResourceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl OrderingService for OrderingServiceImpl {
    async fn reorder(
        &self,
        collection: Collection,
        ids: &[ResourceId],
    ) -> ContentResult<Vec<Resource>> {
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(duplicate) = ids.iter().find(|id| !seen.insert(*id)) {
            return Err(ValidationError::DuplicateId(duplicate.to_string()).into());
        }

        // Nothing is written unless every id resolves
        let found = try_join_all(ids.iter().map(|id| self.repository.get(collection, id))).await?;
        if let Some((missing, _)) = ids.iter().zip(&found).find(|(_, r)| r.is_none()) {
            return Err(ContentError::not_found(collection, missing));
        }

        let orders: Vec<(ResourceId, u32)> = ids
            .iter()
            .cloned()
            .zip(0u32..)
            .collect();
        self.repository.apply_orders(collection, &orders).await?;
        info!(%collection, count = orders.len(), "collection reordered");

        self.repository
            .list(collection, &ResourceFilter::default(), None)
            .await
    }
}
