//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the link record entity, the storage contract
//! implemented by every backend, and the short code assignment logic.

pub mod codegen;
pub mod error;
pub mod record;
pub mod store;

pub use error::{Result, StorageError};
pub use record::LinkRecord;
pub use store::LinkStore;
