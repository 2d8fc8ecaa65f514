use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::domain::errors::ContentError;

/// Open a SQLite pool, creating the database file if needed.
///
/// In-memory databases live and die with their connection, so those get a
/// single connection that is never recycled.
pub async fn connect_sqlite(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options.connect_with(options).await
}

pub(crate) fn db_error(context: &str, err: sqlx::Error) -> ContentError {
    ContentError::database(format!("Database error {}: {}", context, err))
}

pub(crate) fn corrupt_row(column: &str, err: impl std::fmt::Display) -> ContentError {
    ContentError::database(format!("Invalid value in column '{}': {}", column, err))
}

/// Timestamps are stored as microseconds since the epoch so they sort numerically
pub(crate) fn to_micros(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

pub(crate) fn from_micros(column: &str, micros: i64) -> Result<DateTime<Utc>, ContentError> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| corrupt_row(column, micros))
}

/// Escape `%`, `_` and `\` for a LIKE pattern using `ESCAPE '\'`
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("seo"), "seo");
    }

    #[test]
    fn test_micros_round_trip() {
        let now = Utc::now();
        let back = from_micros("created_at", to_micros(now)).unwrap();
        assert_eq!(back.timestamp_micros(), now.timestamp_micros());
    }
}
