use crate::convert::{is_unique_violation, map_sqlx_error, timestamp_from_ms};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tinylink_core::error::{Result, StorageError};
use tinylink_core::record::LinkRecord;
use tinylink_core::store::LinkStore;

/// Reserved database path selecting the ephemeral in-memory variant.
pub const MEMORY_PATH: &str = ":memory:";

/// SQLite implementation of the link store contract.
///
/// The pool is capped at a single connection: the embedded backend holds
/// one exclusive handle for the process lifetime, and the in-memory
/// variant stays alive only as long as that connection does.
///
/// Timestamps are stored as `BIGINT` unix milliseconds; the DDL default
/// expression assigns `created_at` from SQLite's own clock.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store from an existing SQLite pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database file at `path`, creating it if missing.
    /// The reserved path [`MEMORY_PATH`] opens an in-memory database.
    pub async fn open(path: &str) -> Result<Self> {
        let (options, pool_options) = if path == MEMORY_PATH {
            (
                SqliteConnectOptions::new().in_memory(true),
                memory_pool_options(),
            )
        } else {
            (
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true),
                SqlitePoolOptions::new().max_connections(1),
            )
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Idempotently creates the `links` table. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                code TEXT PRIMARY KEY,
                url TEXT NOT NULL,
                clicks BIGINT NOT NULL DEFAULT 0,
                created_at BIGINT NOT NULL
                    DEFAULT (CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)),
                last_clicked BIGINT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

/// Pool settings for the in-memory variant. Each physical connection is
/// its own database, so the single connection must never be reaped for
/// idleness or recycled at end of lifetime — either would silently
/// replace the store with an empty one.
fn memory_pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

fn record_from_row(row: &SqliteRow) -> Result<LinkRecord> {
    let code: String = row.try_get("code").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let clicks: i64 = row.try_get("clicks").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let last_clicked: Option<i64> = row.try_get("last_clicked").map_err(map_sqlx_error)?;

    Ok(LinkRecord {
        code,
        url,
        clicks,
        created_at: timestamp_from_ms(created_at)?,
        last_clicked: last_clicked.map(timestamp_from_ms).transpose()?,
    })
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<LinkRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT code, url, clicks, created_at, last_clicked
            FROM links
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(record_from_row).collect()
    }

    async fn get(&self, code: &str) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT code, url, clicks, created_at, last_clicked
            FROM links
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM links
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }

    async fn insert(&self, code: &str, url: &str) -> Result<LinkRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (code, url, clicks)
            VALUES (?, ?, 0)
            "#,
        )
        .bind(code)
        .bind(url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(StorageError::Conflict(code.to_owned()))
            }
            Err(err) => return Err(map_sqlx_error(err)),
        }

        // Re-read so the backend-assigned created_at comes back.
        match self.get(code).await? {
            Some(record) => Ok(record),
            None => Err(StorageError::InvalidData(format!(
                "row for '{code}' missing after insert"
            ))),
        }
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_clicked = CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)
            WHERE code = ?
            "#,
        )
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
