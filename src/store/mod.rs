//! Abstract key-value store boundary
//!
//! The record service persists users through the [`KeyValueStore`] trait and
//! never sees a concrete backend. Items are flat attribute documents keyed by
//! the `email` attribute, and every call is scoped to a named table. The
//! store client is constructed once at startup and injected into handlers;
//! implementations must be safe to share across concurrent requests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// In-memory backend with snapshot persistence
pub mod memory;

pub use memory::MemoryStore;

/// A stored item: a flat map of attribute names to JSON values
pub type Item = Map<String, Value>;

/// Attribute holding the partition key of every item
pub const KEY_ATTRIBUTE: &str = "email";

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named table has not been created on this store
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// An item offered for writing carries no key attribute
    #[error("item is missing the `email` key attribute")]
    MissingKeyAttribute,

    /// Reading or writing a snapshot file failed
    #[error("snapshot i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot file held data the store could not interpret
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Table-scoped key-value operations consumed by the record service
///
/// Each method is one independent call against the backend; there is no
/// retry, batching, or client-side locking at this seam.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Look up a single item by key. `Ok(None)` means the key is absent.
    async fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError>;

    /// Return every item in the table; iteration order is unspecified.
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;

    /// Insert or replace the item stored under its key attribute (upsert).
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// Remove the item stored under `key`. Removing an absent key succeeds.
    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError>;
}
