use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored short link and its click metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The short code, unique across all live records.
    pub code: String,
    /// The target URL, immutable after creation.
    pub url: String,
    /// Number of redirects served for this code. Never decreases.
    pub clicks: i64,
    /// When the record was created, assigned by the backend's clock.
    pub created_at: Timestamp,
    /// When the code was last redirected. `None` until the first redirect.
    pub last_clicked: Option<Timestamp>,
}
