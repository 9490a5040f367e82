//! In-memory medium for testing.
//!
//! [`MemoryMedium`] implements [`Medium`] without touching the filesystem.
//!
//! # Features
//!
//! - **Failure injection**: make reads or writes fail on demand
//! - **Raw seeding**: plant arbitrary (including corrupt) blobs under a key
//! - **Latency simulation**: delay every operation to widen race windows
//! - **Write counting**: assert how many writes an operation performed

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::medium::Medium;

/// An in-memory key-value medium.
///
/// # Example
///
/// ```
/// use devotion_store::{Medium, MemoryMedium};
///
/// #[tokio::main]
/// async fn main() {
///     let medium = MemoryMedium::new();
///     medium.write("greeting", "hello".to_string()).await.unwrap();
///     assert_eq!(medium.read("greeting").await.unwrap().as_deref(), Some("hello"));
///     assert_eq!(medium.write_count(), 1);
/// }
/// ```
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    /// Simulated latency per operation in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    writes: AtomicU32,
}

impl MemoryMedium {
    /// Create an empty medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay each read and write by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(ms, Ordering::SeqCst);
    }

    /// Store `value` under `key` directly, bypassing failure injection and
    /// the write counter.
    pub async fn insert_raw(&self, key: &str, value: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.into());
    }

    /// The raw value stored under `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let ms = self.latency_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait]
impl Medium for MemoryMedium {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.simulate_latency().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Unavailable {
                key: key.to_string(),
                operation: "read",
            });
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> Result<()> {
        self.simulate_latency().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Unavailable {
                key: key.to_string(),
                operation: "write",
            });
        }
        self.entries.write().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
