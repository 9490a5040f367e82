//! Key-value persistence media.
//!
//! The [`Medium`] trait abstracts the durable string store underneath the
//! tables. [`FileMedium`] keeps one JSON file per key in a data directory;
//! [`crate::MemoryMedium`] keeps everything in process for tests.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Error, Result};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Asynchronous string key-value store.
///
/// A resolved `write` is durable, and readers only ever observe whole
/// values: either the previous one or the new one.
///
/// # Example
///
/// ```ignore
/// use devotion_store::{Medium, Result};
///
/// async fn dump<M: Medium>(medium: &M, key: &str) -> Result<()> {
///     match medium.read(key).await? {
///         Some(raw) => println!("{key} = {raw}"),
///         None => println!("{key} never written"),
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Medium: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn write(&self, key: &str, value: String) -> Result<()>;
}

/// File-backed medium storing each key as `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary sibling file, which is synced
/// and then renamed over the target, so a crash mid-write leaves the
/// previous value intact and concurrent writers resolve to last write wins.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Open (and create if needed) a data directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| Error::CreateDirectory {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        info!("Opening data directory at {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// A temp path unique to this write, so concurrent writers in this or
    /// other processes never share one.
    fn temp_path_for(&self, key: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{key}.json.{}.{seq}.tmp", std::process::id()))
    }
}

#[async_trait]
impl Medium for FileMedium {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                debug!("Read {} bytes for {}", raw.len(), key);
                Ok(Some(raw))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.temp_path_for(key);
        let to_error = |source| Error::Write {
            key: key.to_string(),
            source,
        };

        if let Err(e) = write_synced(&tmp, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(to_error(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(to_error(e));
        }
        sync_dir(&self.dir).await;

        debug!("Wrote {} bytes for {}", value.len(), key);
        Ok(())
    }
}

/// Write `bytes` to a fresh file at `path` and flush it to disk.
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Flush the directory entry so a completed rename survives power loss.
#[cfg(unix)]
async fn sync_dir(dir: &Path) {
    let result = match tokio::fs::File::open(dir).await {
        Ok(handle) => handle.sync_all().await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        debug!("Could not sync {}: {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) {}
