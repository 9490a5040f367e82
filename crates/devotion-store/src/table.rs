//! Typed tables over the key-value medium.
//!
//! Each logical table is one JSON blob under one fixed key. A [`Table`]
//! owns that key, decodes the blob into its record type, and carries the
//! single-flight gate that serializes read-modify-write cycles on it.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::error::Result;
use crate::medium::Medium;

/// The fixed keys owned by the store.
///
/// All keys share the `devotion.` prefix so the store can live on a medium
/// shared with other subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKey {
    SavedItems,
    Streak,
    Reflections,
    Premium,
}

impl TableKey {
    /// Every key, in a stable order.
    pub const ALL: [TableKey; 4] = [
        TableKey::SavedItems,
        TableKey::Streak,
        TableKey::Reflections,
        TableKey::Premium,
    ];

    /// The key string on the medium.
    pub const fn as_str(self) -> &'static str {
        match self {
            TableKey::SavedItems => "devotion.saved_items",
            TableKey::Streak => "devotion.streak",
            TableKey::Reflections => "devotion.reflections",
            TableKey::Premium => "devotion.premium",
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed view of one key.
pub(crate) struct Table<T> {
    key: TableKey,
    medium: Arc<dyn Medium>,
    gate: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Table<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub(crate) fn new(key: TableKey, medium: Arc<dyn Medium>) -> Self {
        Self {
            key,
            medium,
            gate: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Acquire the table's single-flight gate.
    ///
    /// Hold the guard across a `load`/`store` pair so that concurrent
    /// mutations of this table cannot interleave.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// Load the record, falling back to `T::default()` when the key is
    /// absent, unreadable or holds a blob that does not decode.
    pub(crate) async fn load(&self) -> T {
        self.read().await.unwrap_or_default()
    }

    /// Load the record, or `None` when [`Table::load`] would default.
    pub(crate) async fn read(&self) -> Option<T> {
        match self.medium.read(self.key.as_str()).await {
            Ok(raw) => self.decode(raw),
            Err(e) => {
                warn!("Reading {} failed, using default: {}", self.key, e);
                None
            }
        }
    }

    /// Load the record ahead of a read-modify-write.
    ///
    /// Absent and malformed blobs still default, but a failed read is
    /// returned as an error: writing back a default built from a read that
    /// never happened would overwrite whatever the medium holds.
    pub(crate) async fn load_for_update(&self) -> Result<T> {
        let raw = self.medium.read(self.key.as_str()).await?;
        Ok(self.decode(raw).unwrap_or_default())
    }

    fn decode(&self, raw: Option<String>) -> Option<T> {
        let Some(raw) = raw else {
            debug!("{} not set, using default", self.key);
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding malformed {} ({} bytes): {}", self.key, raw.len(), e);
                None
            }
        }
    }

    /// Replace the stored record.
    pub(crate) async fn store(&self, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.medium.write(self.key.as_str(), raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryMedium;

    fn table(medium: &Arc<MemoryMedium>) -> Table<Vec<String>> {
        Table::new(TableKey::Reflections, medium.clone())
    }

    #[test]
    fn test_keys_are_distinct_and_namespaced() {
        let keys: std::collections::HashSet<_> =
            TableKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 4);
        assert!(keys.iter().all(|k| k.starts_with("devotion.")));
    }

    #[tokio::test]
    async fn test_absent_key_loads_default() {
        let medium = Arc::new(MemoryMedium::new());
        assert!(table(&medium).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let medium = Arc::new(MemoryMedium::new());
        let table = table(&medium);

        table.store(&vec!["a".to_string(), "b".to_string()]).await.unwrap();

        assert_eq!(table.load().await, vec!["a", "b"]);
        assert_eq!(
            medium.raw("devotion.reflections").await.as_deref(),
            Some(r#"["a","b"]"#)
        );
    }

    #[tokio::test]
    async fn test_malformed_blob_loads_default() {
        let medium = Arc::new(MemoryMedium::new());
        medium.insert_raw("devotion.reflections", "{not json").await;

        assert!(table(&medium).read().await.is_none());
        assert!(table(&medium).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_loads_default() {
        let medium = Arc::new(MemoryMedium::new());
        medium.insert_raw("devotion.reflections", "42").await;

        assert!(table(&medium).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_loads_default() {
        let medium = Arc::new(MemoryMedium::new());
        medium.insert_raw("devotion.reflections", r#"["kept"]"#).await;
        medium.set_fail_reads(true);

        assert!(table(&medium).load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_for_update_propagates_read_failure() {
        let medium = Arc::new(MemoryMedium::new());
        medium.insert_raw("devotion.reflections", r#"["kept"]"#).await;
        medium.set_fail_reads(true);

        assert!(table(&medium).load_for_update().await.is_err());

        medium.set_fail_reads(false);
        assert_eq!(table(&medium).load_for_update().await.unwrap(), vec!["kept"]);
    }

    #[tokio::test]
    async fn test_load_for_update_defaults_absent_and_malformed() {
        let medium = Arc::new(MemoryMedium::new());
        assert!(table(&medium).load_for_update().await.unwrap().is_empty());

        medium.insert_raw("devotion.reflections", "{not json").await;
        assert!(table(&medium).load_for_update().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_returned() {
        let medium = Arc::new(MemoryMedium::new());
        medium.set_fail_writes(true);

        assert!(table(&medium).store(&vec!["x".to_string()]).await.is_err());
    }
}
