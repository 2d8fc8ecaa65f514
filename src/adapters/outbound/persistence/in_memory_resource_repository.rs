use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{ContentError, ContentResult},
        models::{
            next_update_timestamp, now_micros, sort_canonical, NewResource, PageRequest, Resource,
            ResourceDetails, ResourceFilter,
        },
        value_objects::{Collection, ResourceId},
    },
    ports::repositories::ResourceRepository,
};

/// In-memory implementation of ResourceRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryResourceRepository {
    data: Arc<RwLock<HashMap<Collection, HashMap<ResourceId, Resource>>>>,
}

impl InMemoryResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepository {
    async fn insert(&self, new: NewResource) -> ContentResult<Resource> {
        let now = now_micros();
        let resource = Resource {
            id: ResourceId::generate(),
            collection: new.collection,
            title: new.title,
            description: new.description,
            media: new.media,
            order: new.order,
            status: new.status,
            details: new.details,
            created_at: now,
            updated_at: now,
        };

        let mut data = self.data.write().await;
        data.entry(resource.collection)
            .or_default()
            .insert(resource.id.clone(), resource.clone());

        Ok(resource)
    }

    async fn get(
        &self,
        collection: Collection,
        id: &ResourceId,
    ) -> ContentResult<Option<Resource>> {
        let data = self.data.read().await;
        Ok(data.get(&collection).and_then(|c| c.get(id)).cloned())
    }

    async fn update(&self, resource: &Resource) -> ContentResult<Resource> {
        let mut data = self.data.write().await;
        let stored = data
            .get_mut(&resource.collection)
            .and_then(|c| c.get_mut(&resource.id))
            .ok_or_else(|| ContentError::not_found(resource.collection, &resource.id))?;

        let mut updated = resource.clone();
        updated.created_at = stored.created_at;
        updated.updated_at = next_update_timestamp(stored.updated_at);
        *stored = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, collection: Collection, id: &ResourceId) -> ContentResult<bool> {
        let mut data = self.data.write().await;
        Ok(data
            .get_mut(&collection)
            .and_then(|c| c.remove(id))
            .is_some())
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &ResourceFilter,
        page: Option<PageRequest>,
    ) -> ContentResult<Vec<Resource>> {
        let data = self.data.read().await;
        let mut resources: Vec<Resource> = data
            .get(&collection)
            .map(|c| c.values().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default();
        drop(data);

        sort_canonical(&mut resources);

        Ok(match page {
            Some(page) => resources
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .collect(),
            None => resources,
        })
    }

    async fn count(&self, collection: Collection, filter: &ResourceFilter) -> ContentResult<usize> {
        let data = self.data.read().await;
        Ok(data
            .get(&collection)
            .map(|c| c.values().filter(|r| filter.matches(r)).count())
            .unwrap_or(0))
    }

    async fn max_order(&self, collection: Collection) -> ContentResult<Option<u32>> {
        let data = self.data.read().await;
        Ok(data
            .get(&collection)
            .and_then(|c| c.values().map(|r| r.order).max()))
    }

    async fn apply_orders(
        &self,
        collection: Collection,
        orders: &[(ResourceId, u32)],
    ) -> ContentResult<()> {
        let mut data = self.data.write().await;
        let Some(resources) = data.get_mut(&collection) else {
            return match orders.first() {
                Some((id, _)) => Err(ContentError::not_found(collection, id)),
                None => Ok(()),
            };
        };

        // Check every id under the same lock before touching anything
        if let Some((missing, _)) = orders.iter().find(|(id, _)| !resources.contains_key(id)) {
            return Err(ContentError::not_found(collection, missing));
        }

        for (id, order) in orders {
            if let Some(resource) = resources.get_mut(id) {
                resource.order = *order;
                resource.updated_at = next_update_timestamp(resource.updated_at);
            }
        }

        Ok(())
    }

    async fn increment_views(
        &self,
        collection: Collection,
        id: &ResourceId,
    ) -> ContentResult<Option<u64>> {
        let mut data = self.data.write().await;
        let Some(resource) = data.get_mut(&collection).and_then(|c| c.get_mut(id)) else {
            return Ok(None);
        };

        match &mut resource.details {
            ResourceDetails::Video { views, .. } => {
                *views += 1;
                let count = *views;
                resource.updated_at = next_update_timestamp(resource.updated_at);
                Ok(Some(count))
            }
            _ => Ok(None),
        }
    }
}
