//! Local persistence and streak accounting for the Devotion app.
//!
//! This crate owns every piece of durable user state: bookmarked passages,
//! journal reflections, the premium entitlement flag and the daily visit
//! streak. Each lives in its own table, stored as one JSON blob under a
//! fixed key on an asynchronous key-value [`Medium`].
//!
//! # Features
//!
//! - Idempotent bookmarks keyed by content id
//! - Append-only reflections kept in insertion order
//! - Consecutive-day streak computed on local calendar dates
//! - Corrupt or unreadable data degrades to defaults instead of failing
//! - Per-table serialization of read-modify-write operations
//! - File-backed and in-memory media
//!
//! # Example
//!
//! ```no_run
//! use devotion_store::Store;
//!
//! # async fn run() -> devotion_store::Result<()> {
//! let store = Store::open_default()?;
//!
//! let visit = store.record_visit().await;
//! println!("Day {} of your streak", visit.count);
//!
//! if store.is_premium().await {
//!     println!("{} saved passages", store.list_saved().await.len());
//! }
//! # Ok(())
//! # }
//! ```

mod clock;
mod error;
mod medium;
mod mock;
mod store;
mod streak;
mod table;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use medium::{FileMedium, Medium};
pub use mock::MemoryMedium;
pub use store::{Store, Visit};
pub use streak::{StreakChange, advance as advance_streak};
pub use table::TableKey;

pub use devotion_types as types;

/// Default data directory following platform conventions.
///
/// - Linux: `~/.local/share/devotion`
/// - macOS: `~/Library/Application Support/devotion`
/// - Windows: `C:\Users\<user>\AppData\Local\devotion`
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("devotion")
}
