use crate::convert::{is_unique_violation, map_sqlx_error, timestamp_from_ms};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tinylink_core::error::{Result, StorageError};
use tinylink_core::record::LinkRecord;
use tinylink_core::store::LinkStore;

/// Postgres implementation of the link store contract.
///
/// Behaviorally identical to the SQLite store; only the placeholder style
/// and the clock expressions differ. Timestamps are stored as `BIGINT`
/// unix milliseconds assigned by `now()` on the server.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from an existing Postgres connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
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
                    DEFAULT (floor(extract(epoch from now()) * 1000))::bigint,
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

fn record_from_row(row: &PgRow) -> Result<LinkRecord> {
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
impl LinkStore for PostgresStore {
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
            WHERE code = $1
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
            WHERE code = $1
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
            VALUES ($1, $2, 0)
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
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
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
                last_clicked = (floor(extract(epoch from now()) * 1000))::bigint
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
