//! Shared, lock-protected progress of running and recent generations.
//!
//! Entries are keyed by region. A run creates its entry, updates it at each
//! state change and stamps it when it reaches a terminal state. Finished
//! entries are dropped by [`ProgressStore::reap`] once older than the store's
//! time to live. Readers always receive cloned snapshots.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// How long finished entries are kept by default.
pub const DEFAULT_PROGRESS_TTL: Duration = Duration::from_secs(60 * 60);

/// State of a region generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// No run has been recorded.
    #[default]
    Idle,
    /// Computing the tile grid.
    Initializing,
    /// Resolving the regional dataset.
    DownloadingData,
    /// Tiles are being generated.
    Processing,
    /// A tile's features are being extracted.
    ProcessingOsm,
    /// A tile is being rendered and written.
    RenderingTile,
    /// The run finished; some tiles may have failed.
    Completed,
    /// The run aborted.
    Error,
}

impl GenerationStatus {
    /// Whether no further transitions follow.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// Point-in-time view of one region's run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Region being generated.
    pub region: String,
    /// Current state.
    pub status: GenerationStatus,
    /// Tiles in the region's grid.
    pub total_tiles: usize,
    /// Tiles finished so far, successful or not.
    pub completed_tiles: usize,
    /// Key of the tile most recently started.
    pub current_tile: Option<String>,
    /// Run-fatal error message.
    pub error: Option<String>,
    /// When the run started.
    pub started_at: Timestamp,
    /// When the run reached a terminal state.
    pub finished_at: Option<Timestamp>,
}

#[derive(Debug)]
struct Entry {
    snapshot: ProgressSnapshot,
    finished: Option<Instant>,
}

/// Progress of generation runs, shareable across threads.
///
/// # Examples
/// ```
/// use tilewright_pipeline::{GenerationStatus, ProgressStore};
///
/// let store = ProgressStore::default();
/// store.start("toronto-downtown");
/// store.update("toronto-downtown", |progress| progress.total_tiles = 4);
/// let snapshot = store.snapshot("toronto-downtown").expect("run recorded");
/// assert_eq!(snapshot.status, GenerationStatus::Initializing);
/// assert_eq!(snapshot.total_tiles, 4);
/// ```
#[derive(Debug, Clone)]
pub struct ProgressStore {
    entries: Arc<RwLock<BTreeMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_TTL)
    }
}

impl ProgressStore {
    /// A store keeping finished entries for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::default(),
            ttl,
        }
    }

    /// Record the start of a run, replacing any previous entry for `region`.
    pub fn start(&self, region: &str) {
        let snapshot = ProgressSnapshot {
            region: region.to_owned(),
            status: GenerationStatus::Initializing,
            total_tiles: 0,
            completed_tiles: 0,
            current_tile: None,
            error: None,
            started_at: Timestamp::now(),
            finished_at: None,
        };
        self.write().insert(
            region.to_owned(),
            Entry {
                snapshot,
                finished: None,
            },
        );
    }

    /// Apply `change` to the entry for `region`, if one exists.
    pub fn update(&self, region: &str, change: impl FnOnce(&mut ProgressSnapshot)) {
        if let Some(entry) = self.write().get_mut(region) {
            change(&mut entry.snapshot);
        }
    }

    /// Move the entry for `region` to a terminal `status`.
    pub fn finish(&self, region: &str, status: GenerationStatus, error: Option<String>) {
        if let Some(entry) = self.write().get_mut(region) {
            entry.snapshot.status = status;
            entry.snapshot.error = error;
            entry.snapshot.current_tile = None;
            entry.snapshot.finished_at = Some(Timestamp::now());
            entry.finished = Some(Instant::now());
        }
    }

    /// Copy of the entry for `region`.
    #[must_use]
    pub fn snapshot(&self, region: &str) -> Option<ProgressSnapshot> {
        self.read().get(region).map(|entry| entry.snapshot.clone())
    }

    /// Copies of every entry, ordered by region.
    #[must_use]
    pub fn snapshots(&self) -> Vec<ProgressSnapshot> {
        self.read()
            .values()
            .map(|entry| entry.snapshot.clone())
            .collect()
    }

    /// Drop finished entries older than the time to live. Returns how many
    /// were removed.
    #[must_use]
    pub fn reap(&self) -> usize {
        let ttl = self.ttl;
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.finished.is_none_or(|at| at.elapsed() < ttl));
        before.saturating_sub(entries.len())
    }

    // A panic while holding the lock leaves plain data behind; keep serving it.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
