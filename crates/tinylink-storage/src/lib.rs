//! Storage backends for the tinylink URL shortener.
//!
//! Two implementations of the [`LinkStore`](tinylink_core::LinkStore)
//! contract — an embedded SQLite store and a networked Postgres store —
//! plus the startup logic that picks between them and ensures the schema
//! exists before the service accepts traffic.

pub mod bootstrap;
mod convert;
pub mod postgres;
pub mod sqlite;

pub use bootstrap::{bootstrap, Activation, StorageConfig};
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;
