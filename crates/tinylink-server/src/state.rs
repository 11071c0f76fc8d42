use std::sync::Arc;
use tinylink_core::LinkStore;

/// Shared handler state: the backend handle picked at startup plus the
/// public base URL used to render short links.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LinkStore>,
    pub base_url: String,
}

impl AppState {
    pub fn new(store: Arc<dyn LinkStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
