use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

use super::sql_support::{corrupt_row, db_error, escape_like, from_micros, to_micros};
use crate::{
    domain::{
        errors::{ContentError, ContentResult, ValidationError},
        models::{
            next_update_timestamp, now_micros, NewResource, PageRequest, Resource, ResourceDetails,
            ResourceFilter,
        },
        value_objects::{Collection, MediaRef, ResourceId},
    },
    ports::repositories::ResourceRepository,
};

const SELECT_RESOURCE: &str = r#"
    SELECT id, collection, title, description, media_url, media_storage_id,
           sort_order, status, details, created_at, updated_at
    FROM resources
"#;

/// SQLite-backed implementation of ResourceRepository
#[derive(Clone)]
pub struct SqlResourceRepository {
    pool: SqlitePool,
}

impl SqlResourceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                media_url TEXT,
                media_storage_id TEXT,
                sort_order INTEGER NOT NULL,
                status TEXT NOT NULL,
                category TEXT,
                tags TEXT NOT NULL DEFAULT '',
                details TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_resources_collection_order
                ON resources(collection, sort_order);
            CREATE INDEX IF NOT EXISTS idx_resources_collection_status
                ON resources(collection, status);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn updated_at_of(
        conn: &mut sqlx::SqliteConnection,
        collection: Collection,
        id: &ResourceId,
    ) -> ContentResult<Option<i64>> {
        sqlx::query_scalar("SELECT updated_at FROM resources WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id.as_str())
            .fetch_optional(conn)
            .await
            .map_err(|e| db_error("reading resource timestamp", e))
    }
}

fn push_filter(
    builder: &mut QueryBuilder<'_, Sqlite>,
    collection: Collection,
    filter: &ResourceFilter,
) {
    builder
        .push(" WHERE collection = ")
        .push_bind(collection.as_str());

    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(category) = filter.category {
        builder.push(" AND category = ").push_bind(category.label());
    }
    if let Some(term) = filter.search_term() {
        let pattern = format!("%{}%", escape_like(&term));
        builder
            .push(" AND (LOWER(title) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR LOWER(description) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR LOWER(tags) LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

fn details_json(details: &ResourceDetails) -> ContentResult<String> {
    serde_json::to_string(details)
        .map_err(|e| ContentError::database(format!("Failed to serialize details: {}", e)))
}

fn parse_details(raw: &str) -> ContentResult<ResourceDetails> {
    serde_json::from_str(raw).map_err(|e| corrupt_row("details", e))
}

fn resource_from_row(row: &SqliteRow) -> ContentResult<Resource> {
    let get_err = |e| db_error("decoding resource row", e);

    let id: String = row.try_get("id").map_err(get_err)?;
    let collection: String = row.try_get("collection").map_err(get_err)?;
    let status: String = row.try_get("status").map_err(get_err)?;
    let order: i64 = row.try_get("sort_order").map_err(get_err)?;
    let details: String = row.try_get("details").map_err(get_err)?;
    let media_url: Option<String> = row.try_get("media_url").map_err(get_err)?;
    let media_storage_id: Option<String> = row.try_get("media_storage_id").map_err(get_err)?;
    let created_at: i64 = row.try_get("created_at").map_err(get_err)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(get_err)?;

    let media = match (media_url, media_storage_id) {
        (Some(url), Some(storage_id)) => Some(MediaRef { url, storage_id }),
        _ => None,
    };

    Ok(Resource {
        id: ResourceId::new(id).map_err(|e| corrupt_row("id", e))?,
        collection: collection.parse().map_err(|e| corrupt_row("collection", e))?,
        title: row.try_get("title").map_err(get_err)?,
        description: row.try_get("description").map_err(get_err)?,
        media,
        order: u32::try_from(order).map_err(|e| corrupt_row("sort_order", e))?,
        status: status.parse().map_err(|e| corrupt_row("status", e))?,
        details: parse_details(&details)?,
        created_at: from_micros("created_at", created_at)?,
        updated_at: from_micros("updated_at", updated_at)?,
    })
}

#[async_trait]
impl ResourceRepository for SqlResourceRepository {
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

        sqlx::query(
            r#"
            INSERT INTO resources (
                id, collection, title, description, media_url, media_storage_id,
                sort_order, status, category, tags, details, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(resource.id.as_str())
        .bind(resource.collection.as_str())
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(resource.media.as_ref().map(|m| m.url.as_str()))
        .bind(resource.media.as_ref().map(|m| m.storage_id.as_str()))
        .bind(i64::from(resource.order))
        .bind(resource.status.as_str())
        .bind(resource.details.category().map(|c| c.label()))
        .bind(resource.details.tags().join(","))
        .bind(details_json(&resource.details)?)
        .bind(to_micros(resource.created_at))
        .bind(to_micros(resource.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("inserting resource", e))?;

        Ok(resource)
    }

    async fn get(
        &self,
        collection: Collection,
        id: &ResourceId,
    ) -> ContentResult<Option<Resource>> {
        let row = sqlx::query(&format!("{} WHERE collection = ? AND id = ?", SELECT_RESOURCE))
            .bind(collection.as_str())
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("retrieving resource", e))?;

        row.as_ref().map(resource_from_row).transpose()
    }

    async fn update(&self, resource: &Resource) -> ContentResult<Resource> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let previous = Self::updated_at_of(&mut *tx, resource.collection, &resource.id)
            .await?
            .ok_or_else(|| ContentError::not_found(resource.collection, &resource.id))?;

        let mut updated = resource.clone();
        updated.updated_at = next_update_timestamp(from_micros("updated_at", previous)?);

        sqlx::query(
            r#"
            UPDATE resources SET
                title = ?, description = ?, media_url = ?, media_storage_id = ?,
                sort_order = ?, status = ?, category = ?, tags = ?, details = ?,
                updated_at = ?
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(&updated.title)
        .bind(&updated.description)
        .bind(updated.media.as_ref().map(|m| m.url.as_str()))
        .bind(updated.media.as_ref().map(|m| m.storage_id.as_str()))
        .bind(i64::from(updated.order))
        .bind(updated.status.as_str())
        .bind(updated.details.category().map(|c| c.label()))
        .bind(updated.details.tags().join(","))
        .bind(details_json(&updated.details)?)
        .bind(to_micros(updated.updated_at))
        .bind(updated.collection.as_str())
        .bind(updated.id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("updating resource", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing update", e))?;

        Ok(updated)
    }

    async fn delete(&self, collection: Collection, id: &ResourceId) -> ContentResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting resource", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &ResourceFilter,
        page: Option<PageRequest>,
    ) -> ContentResult<Vec<Resource>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_RESOURCE);
        push_filter(&mut builder, collection, filter);
        builder.push(" ORDER BY sort_order ASC, created_at DESC, id ASC");

        if let Some(page) = page {
            let out_of_range = |_| ValidationError::PageOutOfRange {
                page: page.page(),
                limit: page.limit(),
            };
            let limit = i64::try_from(page.limit()).map_err(out_of_range)?;
            let offset = i64::try_from(page.offset()).map_err(out_of_range)?;
            builder
                .push(" LIMIT ")
                .push_bind(limit)
                .push(" OFFSET ")
                .push_bind(offset);
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing resources", e))?;

        rows.iter().map(resource_from_row).collect()
    }

    async fn count(&self, collection: Collection, filter: &ResourceFilter) -> ContentResult<usize> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM resources");
        push_filter(&mut builder, collection, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting resources", e))?;

        usize::try_from(count).map_err(|e| corrupt_row("count", e))
    }

    async fn max_order(&self, collection: Collection) -> ContentResult<Option<u32>> {
        let max: Option<i64> =
            sqlx::query_scalar("SELECT MAX(sort_order) FROM resources WHERE collection = ?")
                .bind(collection.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("reading max order", e))?;

        max.map(|m| u32::try_from(m).map_err(|e| corrupt_row("sort_order", e)))
            .transpose()
    }

    async fn apply_orders(
        &self,
        collection: Collection,
        orders: &[(ResourceId, u32)],
    ) -> ContentResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let mut previous = Vec::with_capacity(orders.len());
        for (id, _) in orders {
            let updated_at = Self::updated_at_of(&mut *tx, collection, id)
                .await?
                .ok_or_else(|| ContentError::not_found(collection, id))?;
            previous.push(from_micros("updated_at", updated_at)?);
        }

        for ((id, order), previous) in orders.iter().zip(previous) {
            sqlx::query(
                "UPDATE resources SET sort_order = ?, updated_at = ? WHERE collection = ? AND id = ?",
            )
            .bind(i64::from(*order))
            .bind(to_micros(next_update_timestamp(previous)))
            .bind(collection.as_str())
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("updating order", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing reorder", e))?;

        Ok(())
    }

    async fn increment_views(
        &self,
        collection: Collection,
        id: &ResourceId,
    ) -> ContentResult<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT details, updated_at FROM resources WHERE collection = ? AND id = ?",
        )
        .bind(collection.as_str())
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("reading view count", e))?;

        let Some((raw, updated_at)) = row else {
            return Ok(None);
        };

        let mut details = parse_details(&raw)?;
        let count = match &mut details {
            ResourceDetails::Video { views, .. } => {
                *views += 1;
                *views
            }
            _ => return Ok(None),
        };

        let updated_at = next_update_timestamp(from_micros("updated_at", updated_at)?);
        sqlx::query("UPDATE resources SET details = ?, updated_at = ? WHERE collection = ? AND id = ?")
            .bind(details_json(&details)?)
            .bind(to_micros(updated_at))
            .bind(collection.as_str())
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("updating view count", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing view count", e))?;

        Ok(Some(count))
    }
}
