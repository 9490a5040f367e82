//! Main store implementation.

use std::path::Path;
use std::sync::Arc;

use devotion_types::{PremiumFlag, Reflection, SavedItem, StreakRecord};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::medium::{FileMedium, Medium};
use crate::mock::MemoryMedium;
use crate::streak::{self, StreakChange};
use crate::table::{Table, TableKey};

/// Outcome of [`Store::record_visit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit {
    /// Streak length after the visit.
    pub count: u32,
    /// What the visit did to the streak.
    pub change: StreakChange,
    /// Whether the medium holds the new record. `false` only when a
    /// required write failed; `count` is then the intended value.
    pub persisted: bool,
}

/// Durable user state: saved items, reflections, the premium flag and the
/// visit streak.
///
/// Every read-modify-write is serialized per table, so concurrent calls on
/// one `Store` never lose updates. Separate `Store` values over the same
/// medium do not coordinate; the last write wins.
///
/// Reads never fail: missing, corrupt or unreadable tables read as empty.
/// Mutations of the saved items and reflections fail instead when the
/// medium cannot be read, leaving the stored collection untouched.
pub struct Store {
    clock: Arc<dyn Clock>,
    saved: Table<Vec<SavedItem>>,
    reflections: Table<Vec<Reflection>>,
    premium: Table<PremiumFlag>,
    streak: Table<StreakRecord>,
}

impl Store {
    /// Build a store over any medium and clock.
    pub fn new(medium: Arc<dyn Medium>, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            saved: Table::new(TableKey::SavedItems, medium.clone()),
            reflections: Table::new(TableKey::Reflections, medium.clone()),
            premium: Table::new(TableKey::Premium, medium.clone()),
            streak: Table::new(TableKey::Streak, medium),
        }
    }

    /// Open or create a file-backed store in `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open_with_clock(dir, Arc::new(SystemClock::new()))
    }

    /// Open or create a file-backed store in `dir` using `clock`.
    pub fn open_with_clock<P: AsRef<Path>>(dir: P, clock: Arc<dyn Clock>) -> Result<Self> {
        let medium = FileMedium::open(dir)?;
        Ok(Self::new(Arc::new(medium), clock))
    }

    /// Open the default data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_data_dir())
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Self {
        Self::new(Arc::new(MemoryMedium::new()), Arc::new(SystemClock::new()))
    }

    // === Saved items ===

    /// All saved items in the order they were saved.
    pub async fn list_saved(&self) -> Vec<SavedItem> {
        self.saved.load().await
    }

    /// Whether an item with `id` is saved.
    pub async fn is_saved(&self, id: &str) -> bool {
        self.saved.load().await.iter().any(|item| item.id == id)
    }

    /// Save `item` unless an item with the same id is already saved.
    ///
    /// An existing item is left exactly as it was, even when `item` carries
    /// different text.
    pub async fn save_item(&self, item: SavedItem) -> Result<()> {
        let _guard = self.saved.lock().await;
        let mut items = self.saved.load_for_update().await?;

        if items.iter().any(|existing| existing.id == item.id) {
            debug!("{} already saved", item.id);
            return Ok(());
        }

        debug!("Saving {}", item.id);
        items.push(item);
        self.saved.store(&items).await
    }

    /// Remove the item with `id`, if any.
    pub async fn remove_item(&self, id: &str) -> Result<()> {
        let _guard = self.saved.lock().await;
        let mut items = self.saved.load_for_update().await?;

        let before = items.len();
        items.retain(|item| item.id != id);
        debug!("Removing {} ({} matched)", id, before - items.len());

        self.saved.store(&items).await
    }

    /// Save `item` if it is not saved, remove it if it is.
    ///
    /// Returns whether the item is saved afterwards.
    pub async fn toggle_saved(&self, item: SavedItem) -> Result<bool> {
        let _guard = self.saved.lock().await;
        let mut items = self.saved.load_for_update().await?;

        let saved = match items.iter().position(|existing| existing.id == item.id) {
            Some(index) => {
                items.remove(index);
                false
            }
            None => {
                items.push(item);
                true
            }
        };

        self.saved.store(&items).await?;
        Ok(saved)
    }

    // === Reflections ===

    /// All reflections in the order they were written.
    pub async fn list_reflections(&self) -> Vec<Reflection> {
        self.reflections.load().await
    }

    /// Reflections about `subject_id`, oldest first.
    pub async fn reflections_for(&self, subject_id: &str) -> Vec<Reflection> {
        self.reflections
            .load()
            .await
            .into_iter()
            .filter(|r| r.subject_id == subject_id)
            .collect()
    }

    /// Append a reflection. Content is stored as given, even when blank.
    pub async fn add_reflection(&self, reflection: Reflection) -> Result<()> {
        let _guard = self.reflections.lock().await;
        let mut reflections = self.reflections.load_for_update().await?;

        debug!("Adding reflection on {}", reflection.subject_id);
        reflections.push(reflection);
        self.reflections.store(&reflections).await
    }

    // === Premium ===

    /// Whether premium content is unlocked. `false` until set.
    pub async fn is_premium(&self) -> bool {
        self.premium.load().await.is_premium
    }

    /// Overwrite the premium flag.
    pub async fn set_premium(&self, value: bool) -> Result<()> {
        let _guard = self.premium.lock().await;
        info!("Setting premium to {}", value);
        self.premium.store(&PremiumFlag::from(value)).await
    }

    // === Streak ===

    /// Current streak length without recording a visit. `0` if none.
    pub async fn streak_count(&self) -> u32 {
        self.streak.load().await.count
    }

    /// The stored streak record.
    pub async fn streak_record(&self) -> StreakRecord {
        self.streak.load().await
    }

    /// Record a visit today and return the resulting streak.
    ///
    /// Repeated calls on the same calendar day leave the streak as it is
    /// and write nothing. An unreadable record counts as no record. If the
    /// write fails, the returned count is still the new value and
    /// [`Visit::persisted`] is `false`.
    pub async fn record_visit(&self) -> Visit {
        let _guard = self.streak.lock().await;

        let stored = self.streak.load().await;
        let today = self.clock.today();
        let (next, change) = streak::advance(stored, today);

        debug!(
            "Visit on {}: {:?} ({} -> {})",
            today, change, stored.count, next.count
        );

        let persisted = if change.needs_write() {
            match self.streak.store(&next).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Failed to persist streak of {}: {}", next.count, e);
                    false
                }
            }
        } else {
            true
        };

        Visit {
            count: next.count,
            change,
            persisted,
        }
    }

    /// Record a visit and return only the streak length.
    pub async fn record_visit_and_get_streak(&self) -> u32 {
        self.record_visit().await.count
    }
}
