// In-memory store backend
// Holds tables as plain maps and snapshots them to a JSON file

use super::{Item, KeyValueStore, StoreError, KEY_ATTRIBUTE};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

/// Serializable structure for a store snapshot
/// Used for saving/loading table contents to/from JSON files
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotData {
    /// Version of the snapshot format (for future migration support)
    version: u32,
    /// Map of table name to keyed items
    tables: HashMap<String, HashMap<String, Item>>,
}

/// In-memory key-value store
///
/// Tables live behind a single `RwLock`, so one handle can be shared across
/// concurrent request handlers. Operations against a table that was never
/// created fail with [`StoreError::TableNotFound`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, HashMap<String, Item>>>,
}

impl MemoryStore {
    /// Create an empty store with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the named table if it does not exist yet
    pub async fn create_table(&self, table: &str) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default();
    }

    /// Load a store from a snapshot file
    ///
    /// A missing file yields an empty store; a present file must parse as a
    /// version-1 snapshot.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path.as_ref())?;
        let data: SnapshotData = serde_json::from_str(&json)
            .map_err(|e| StoreError::InvalidSnapshot(e.to_string()))?;

        if data.version != 1 {
            return Err(StoreError::InvalidSnapshot(format!(
                "unsupported snapshot version: {}",
                data.version
            )));
        }

        Ok(Self {
            tables: RwLock::new(data.tables),
        })
    }

    /// Write the current table contents to a snapshot file
    ///
    /// Creates the parent directory when needed.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let tables = self.tables.read().await;
        let data = SnapshotData {
            version: 1,
            tables: tables.clone(),
        };

        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| StoreError::InvalidSnapshot(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_ref(), json)?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError> {
        let tables = self.tables.read().await;
        let items = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        Ok(items.get(key).cloned())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().await;
        let items = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        Ok(items.values().cloned().collect())
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let key = match item.get(KEY_ATTRIBUTE) {
            Some(Value::String(key)) if !key.is_empty() => key.clone(),
            _ => return Err(StoreError::MissingKeyAttribute),
        };

        let mut tables = self.tables.write().await;
        let items = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        items.insert(key, item);
        Ok(())
    }

    async fn delete(&self, table: &str, key: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let items = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TABLE: &str = "users";

    fn item(email: &str) -> Item {
        json!({ "email": email, "firstname": "A", "lastname": "B" })
            .as_object()
            .unwrap()
            .clone()
    }

    async fn store_with_table() -> MemoryStore {
        let store = MemoryStore::new();
        store.create_table(TABLE).await;
        store
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = store_with_table().await;
        store.put(TABLE, item("a@b.com")).await.unwrap();

        let fetched = store.get(TABLE, "a@b.com").await.unwrap();
        assert_eq!(fetched, Some(item("a@b.com")));
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let store = store_with_table().await;
        let fetched = store.get(TABLE, "missing@b.com").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing_item() {
        let store = store_with_table().await;
        store.put(TABLE, item("a@b.com")).await.unwrap();

        let mut updated = item("a@b.com");
        updated.insert("firstname".to_string(), json!("Changed"));
        store.put(TABLE, updated.clone()).await.unwrap();

        let fetched = store.get(TABLE, "a@b.com").await.unwrap();
        assert_eq!(fetched, Some(updated));
    }

    #[tokio::test]
    async fn test_put_without_key_attribute_fails() {
        let store = store_with_table().await;
        let bad = json!({ "firstname": "A" }).as_object().unwrap().clone();

        let result = store.put(TABLE, bad).await;
        assert!(matches!(result, Err(StoreError::MissingKeyAttribute)));
    }

    #[tokio::test]
    async fn test_scan_returns_every_item() {
        let store = store_with_table().await;
        for email in ["a@b.com", "c@d.com", "e@f.com"] {
            store.put(TABLE, item(email)).await.unwrap();
        }

        let items = store.scan(TABLE).await.unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        let store = store_with_table().await;
        store.delete(TABLE, "missing@b.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_table_is_an_error() {
        let store = store_with_table().await;
        let result = store.get("other-table", "a@b.com").await;
        assert!(matches!(result, Err(StoreError::TableNotFound(_))));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let store = store_with_table().await;
        store.put(TABLE, item("a@b.com")).await.unwrap();
        store.save_to_file(&path).await.unwrap();

        let loaded = MemoryStore::load_from_file(&path).unwrap();
        let fetched = loaded.get(TABLE, "a@b.com").await.unwrap();
        assert_eq!(fetched, Some(item("a@b.com")));
    }

    #[tokio::test]
    async fn test_load_missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::load_from_file(dir.path().join("absent.json")).unwrap();

        // No tables exist until created
        let result = store.get(TABLE, "a@b.com").await;
        assert!(matches!(result, Err(StoreError::TableNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{"version": 2, "tables": {}}"#).unwrap();

        let result = MemoryStore::load_from_file(&path);
        assert!(matches!(result, Err(StoreError::InvalidSnapshot(_))));
    }
}
