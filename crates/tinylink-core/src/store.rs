use crate::error::Result;
use crate::record::LinkRecord;
use async_trait::async_trait;

/// The storage contract for link records.
///
/// Both backends (embedded SQLite and networked Postgres) implement this
/// trait with identical observable behavior; only the query dialect
/// differs. The process holds a single `Arc<dyn LinkStore>` selected at
/// startup and shared by every operation.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Returns all link records, newest first (`created_at` descending).
    async fn get_all(&self) -> Result<Vec<LinkRecord>>;

    /// Retrieves the record for a given code.
    /// Returns `None` if the code does not exist. No side effects.
    async fn get(&self, code: &str) -> Result<Option<LinkRecord>>;

    /// Checks whether a code is already taken.
    async fn exists(&self, code: &str) -> Result<bool>;

    /// Creates a record with zero clicks and a backend-assigned creation
    /// time, then returns it as stored. Uniqueness is enforced by the
    /// backend's primary-key constraint, not a prior existence check;
    /// a taken code yields `Err(Conflict)`.
    async fn insert(&self, code: &str, url: &str) -> Result<LinkRecord>;

    /// Deletes the record for a given code.
    /// Returns `true` if the record existed and was removed; deleting an
    /// absent code is a no-op, not an error.
    async fn delete(&self, code: &str) -> Result<bool>;

    /// Atomically increments the click count and stamps `last_clicked`
    /// with the backend's current time, in a single statement.
    /// Returns `true` if a record matched.
    async fn increment_clicks(&self, code: &str) -> Result<bool>;
}
