use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::sql_support::{corrupt_row, db_error, from_micros, to_micros};
use crate::{
    domain::{
        errors::ContentResult,
        models::{next_update_timestamp, now_micros, LibraryImage},
        value_objects::{MediaRef, ResourceId},
    },
    ports::repositories::ImageRepository,
};

const SELECT_IMAGE: &str = r#"
    SELECT id, url, storage_id, file_size, created_at, updated_at
    FROM images
"#;

/// SQLite-backed implementation of ImageRepository
#[derive(Clone)]
pub struct SqlImageRepository {
    pool: SqlitePool,
}

impl SqlImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS images (
                id TEXT PRIMARY KEY,
                url TEXT NOT NULL,
                storage_id TEXT NOT NULL,
                file_size INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_images_created_at ON images(created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn image_from_row(row: &SqliteRow) -> ContentResult<LibraryImage> {
    let get_err = |e| db_error("decoding image row", e);

    let id: String = row.try_get("id").map_err(get_err)?;
    let file_size: i64 = row.try_get("file_size").map_err(get_err)?;
    let created_at: i64 = row.try_get("created_at").map_err(get_err)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(get_err)?;

    Ok(LibraryImage {
        id: ResourceId::new(id).map_err(|e| corrupt_row("id", e))?,
        media: MediaRef {
            url: row.try_get("url").map_err(get_err)?,
            storage_id: row.try_get("storage_id").map_err(get_err)?,
        },
        file_size: u64::try_from(file_size).map_err(|e| corrupt_row("file_size", e))?,
        created_at: from_micros("created_at", created_at)?,
        updated_at: from_micros("updated_at", updated_at)?,
    })
}

fn size_param(file_size: u64) -> ContentResult<i64> {
    i64::try_from(file_size).map_err(|e| corrupt_row("file_size", e))
}

#[async_trait]
impl ImageRepository for SqlImageRepository {
    async fn insert(&self, media: MediaRef, file_size: u64) -> ContentResult<LibraryImage> {
        let now = now_micros();
        let image = LibraryImage {
            id: ResourceId::generate(),
            media,
            file_size,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO images (id, url, storage_id, file_size, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(image.id.as_str())
        .bind(&image.media.url)
        .bind(&image.media.storage_id)
        .bind(size_param(image.file_size)?)
        .bind(to_micros(image.created_at))
        .bind(to_micros(image.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("inserting image", e))?;

        Ok(image)
    }

    async fn get(&self, id: &ResourceId) -> ContentResult<Option<LibraryImage>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_IMAGE))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("retrieving image", e))?;

        row.as_ref().map(image_from_row).transpose()
    }

    async fn list(&self) -> ContentResult<Vec<LibraryImage>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC, id ASC", SELECT_IMAGE))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing images", e))?;

        rows.iter().map(image_from_row).collect()
    }

    async fn replace_media(
        &self,
        id: &ResourceId,
        media: MediaRef,
        file_size: u64,
    ) -> ContentResult<Option<LibraryImage>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let previous: Option<i64> = sqlx::query_scalar("SELECT updated_at FROM images WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("reading image timestamp", e))?;

        let Some(previous) = previous else {
            return Ok(None);
        };
        let updated_at = next_update_timestamp(from_micros("updated_at", previous)?);

        sqlx::query(
            "UPDATE images SET url = ?, storage_id = ?, file_size = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&media.url)
        .bind(&media.storage_id)
        .bind(size_param(file_size)?)
        .bind(to_micros(updated_at))
        .bind(id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("replacing image media", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing image replacement", e))?;

        self.get(id).await
    }

    async fn delete(&self, id: &ResourceId) -> ContentResult<bool> {
        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting image", e))?;

        Ok(result.rows_affected() > 0)
    }
}
