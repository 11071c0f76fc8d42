//! HTTP layer for the tinylink URL shortener.
//!
//! Thin request/response mapping over the core link store: routing,
//! input validation, configuration, and error rendering. All behavior
//! with any depth lives in `tinylink-core` and `tinylink-storage`.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod validate;

pub use app::App;
pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
