use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::sql_support::{corrupt_row, db_error, from_micros, to_micros};
use crate::{
    domain::{
        errors::ContentResult,
        models::{next_update_timestamp, now_micros, Contact, ContactStatus, NewContact},
        value_objects::{EmailAddress, ResourceId},
    },
    ports::repositories::ContactRepository,
};

const SELECT_CONTACT: &str = r#"
    SELECT id, first_name, last_name, email, phone, company, service, budget,
           message, status, created_at, updated_at
    FROM contacts
"#;

/// SQLite-backed implementation of ContactRepository
#[derive(Clone)]
pub struct SqlContactRepository {
    pool: SqlitePool,
}

impl SqlContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                company TEXT,
                service TEXT,
                budget TEXT,
                message TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'new',
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_contacts_created_at ON contacts(created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn contact_from_row(row: &SqliteRow) -> ContentResult<Contact> {
    let get_err = |e| db_error("decoding contact row", e);

    let id: String = row.try_get("id").map_err(get_err)?;
    let email: String = row.try_get("email").map_err(get_err)?;
    let status: String = row.try_get("status").map_err(get_err)?;
    let created_at: i64 = row.try_get("created_at").map_err(get_err)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(get_err)?;

    Ok(Contact {
        id: ResourceId::new(id).map_err(|e| corrupt_row("id", e))?,
        first_name: row.try_get("first_name").map_err(get_err)?,
        last_name: row.try_get("last_name").map_err(get_err)?,
        email: EmailAddress::new(&email).map_err(|e| corrupt_row("email", e))?,
        phone: row.try_get("phone").map_err(get_err)?,
        company: row.try_get("company").map_err(get_err)?,
        service: row.try_get("service").map_err(get_err)?,
        budget: row.try_get("budget").map_err(get_err)?,
        message: row.try_get("message").map_err(get_err)?,
        status: status.parse().map_err(|e| corrupt_row("status", e))?,
        created_at: from_micros("created_at", created_at)?,
        updated_at: from_micros("updated_at", updated_at)?,
    })
}

#[async_trait]
impl ContactRepository for SqlContactRepository {
    async fn insert(&self, new: NewContact) -> ContentResult<Contact> {
        let now = now_micros();
        let contact = Contact {
            id: ResourceId::generate(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            service: new.service,
            budget: new.budget,
            message: new.message,
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO contacts (
                id, first_name, last_name, email, phone, company, service, budget,
                message, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(contact.id.as_str())
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(contact.email.as_str())
        .bind(&contact.phone)
        .bind(&contact.company)
        .bind(&contact.service)
        .bind(&contact.budget)
        .bind(&contact.message)
        .bind(contact.status.as_str())
        .bind(to_micros(contact.created_at))
        .bind(to_micros(contact.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("inserting contact", e))?;

        Ok(contact)
    }

    async fn get(&self, id: &ResourceId) -> ContentResult<Option<Contact>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_CONTACT))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("retrieving contact", e))?;

        row.as_ref().map(contact_from_row).transpose()
    }

    async fn list(&self) -> ContentResult<Vec<Contact>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC, id ASC", SELECT_CONTACT))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing contacts", e))?;

        rows.iter().map(contact_from_row).collect()
    }

    async fn set_status(
        &self,
        id: &ResourceId,
        status: ContactStatus,
    ) -> ContentResult<Option<Contact>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let previous: Option<i64> =
            sqlx::query_scalar("SELECT updated_at FROM contacts WHERE id = ?")
                .bind(id.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("reading contact timestamp", e))?;

        let Some(previous) = previous else {
            return Ok(None);
        };
        let updated_at = next_update_timestamp(from_micros("updated_at", previous)?);

        sqlx::query("UPDATE contacts SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(to_micros(updated_at))
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("updating contact status", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing contact status", e))?;

        self.get(id).await
    }

    async fn delete(&self, id: &ResourceId) -> ContentResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting contact", e))?;

        Ok(result.rows_affected() > 0)
    }
}
