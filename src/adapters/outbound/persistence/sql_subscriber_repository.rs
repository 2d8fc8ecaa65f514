use async_trait::async_trait;
use sqlx::SqlitePool;

use super::sql_support::{corrupt_row, db_error, from_micros, to_micros};
use crate::{
    domain::{
        errors::{ContentResult, ValidationError},
        models::{now_micros, Subscriber},
        value_objects::EmailAddress,
    },
    ports::repositories::SubscriberRepository,
};

/// SQLite-backed implementation of SubscriberRepository.
///
/// Uniqueness is enforced by the table's primary key.
#[derive(Clone)]
pub struct SqlSubscriberRepository {
    pool: SqlitePool,
}

impl SqlSubscriberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                email TEXT PRIMARY KEY,
                subscribed_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SubscriberRepository for SqlSubscriberRepository {
    async fn insert(&self, email: EmailAddress) -> ContentResult<Subscriber> {
        let subscriber = Subscriber {
            email,
            subscribed_at: now_micros(),
        };

        let result = sqlx::query("INSERT INTO subscribers (email, subscribed_at) VALUES (?, ?)")
            .bind(subscriber.email.as_str())
            .bind(to_micros(subscriber.subscribed_at))
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(subscriber),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ValidationError::AlreadySubscribed(subscriber.email.to_string()).into())
            }
            Err(e) => Err(db_error("inserting subscriber", e)),
        }
    }

    async fn list(&self) -> ContentResult<Vec<Subscriber>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT email, subscribed_at FROM subscribers ORDER BY subscribed_at ASC, email ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing subscribers", e))?;

        rows.into_iter()
            .map(|(email, subscribed_at)| {
                Ok(Subscriber {
                    email: EmailAddress::new(&email).map_err(|e| corrupt_row("email", e))?,
                    subscribed_at: from_micros("subscribed_at", subscribed_at)?,
                })
            })
            .collect()
    }
}
