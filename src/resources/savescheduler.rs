//! Save scheduler resource.
//!
//! Decides *when* the current [`SettingsStore`] snapshot is handed to the
//! storage backend, based on the configured [`SaveMode`]. The scheduler is
//! cooperative: the host calls [`SaveScheduler::tick`] once per frame (via
//! [`persistence_tick`]) and all countdowns are pure functions of elapsed
//! seconds, with no threads or blocking waits.
//!
//! State machine:
//!
//! ```text
//! Clean --(tracked value changes)--> Dirty
//! Dirty --(policy fires)--> Saving --(write ok)--> Clean
//!                           Saving --(write err)--> Dirty
//! ```
//!
//! A failed write is never raised to the host; it is logged and retried on
//! the next natural trigger (next change, next interval tick, or next
//! lifecycle event). At most one write is in flight at a time.
//!
//! [`persistence_tick`]: crate::systems::persistence::persistence_tick

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};

use crate::backend::{BackendError, SettingsBackend};
use crate::resources::settingsstore::SettingsStore;

/// Default quiet period before a debounced flush, in seconds.
const DEFAULT_DEBOUNCE_DELAY: f32 = 0.5;
/// Default cadence for interval saves, in seconds.
const DEFAULT_INTERVAL: f32 = 30.0;

/// When the scheduler writes accepted changes to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Flush on the tick that observes a change, no coalescing.
    Immediate,
    /// Flush once a quiet period elapses after the last change. Collapses
    /// a slider drag into a single write.
    #[default]
    Debounced,
    /// Flush on a fixed cadence, only when there is something to write.
    Interval,
    /// Flush only on an explicit request or lifecycle event.
    Manual,
}

/// Persistence state, exposed for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Everything tracked is on disk.
    Clean,
    /// There are unsaved changes.
    Dirty,
    /// A write is in flight.
    Saving,
}

/// Owns the [`SaveState`] and the storage backend, and applies the
/// save-mode policy each tick.
///
/// Change detection is revision-based: the scheduler remembers the last
/// [`SettingsStore::revision`] it observed and transitions to `Dirty` when
/// the store has moved past it. No-op sets never reach the scheduler.
#[derive(Resource)]
pub struct SaveScheduler {
    mode: SaveMode,
    debounce_delay: f32,
    interval: f32,
    state: SaveState,
    backend: Box<dyn SettingsBackend>,
    seen_revision: u64,
    last_change_at: f32,
    next_interval_at: Option<f32>,
    last_saved_at: Option<f32>,
}

impl SaveScheduler {
    /// Create a scheduler in the default [`SaveMode::Debounced`] mode.
    pub fn new(backend: Box<dyn SettingsBackend>) -> Self {
        SaveScheduler {
            mode: SaveMode::default(),
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            interval: DEFAULT_INTERVAL,
            state: SaveState::Clean,
            backend,
            seen_revision: 0,
            last_change_at: 0.0,
            next_interval_at: None,
            last_saved_at: None,
        }
    }

    pub fn with_mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Quiet period for [`SaveMode::Debounced`], in seconds.
    pub fn with_debounce_delay(mut self, seconds: f32) -> Self {
        self.debounce_delay = seconds;
        self
    }

    /// Cadence for [`SaveMode::Interval`], in seconds.
    pub fn with_interval(mut self, seconds: f32) -> Self {
        self.interval = seconds;
        self
    }

    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Panel time of the last successful flush, if any.
    pub fn last_saved_at(&self) -> Option<f32> {
        self.last_saved_at
    }

    /// Whether the backend resolved to its fallback location.
    pub fn fallback_active(&self) -> bool {
        self.backend.fallback_active()
    }

    /// Hydrate the store from the backend at startup.
    ///
    /// A missing snapshot means "start empty". A malformed snapshot is
    /// discarded with a warning and the store keeps its current (typically
    /// empty) contents. Neither case is fatal, and loading never marks the
    /// store dirty.
    pub fn load(&mut self, store: &mut SettingsStore) {
        match self.backend.read() {
            Ok(bytes) => match store.deserialize(&bytes) {
                Ok(()) => info!("Loaded {} persisted settings", store.len()),
                Err(e) => warn!("Discarding saved settings: {}", e),
            },
            Err(BackendError::NotFound) => debug!("No saved settings, starting empty"),
            Err(e) => warn!("Could not read saved settings: {}", e),
        }
        self.seen_revision = store.revision();
        self.state = SaveState::Clean;
    }

    /// Advance the policy clock. `now` is panel time in seconds.
    pub fn tick(&mut self, store: &SettingsStore, now: f32) {
        self.observe_changes(store, now);

        match self.mode {
            SaveMode::Immediate => {
                if self.state == SaveState::Dirty {
                    self.flush(store, now);
                }
            }
            SaveMode::Debounced => {
                if self.state == SaveState::Dirty
                    && now - self.last_change_at >= self.debounce_delay
                {
                    self.flush(store, now);
                }
            }
            SaveMode::Interval => {
                // Cadence is anchored at panel time zero.
                let due = *self.next_interval_at.get_or_insert(self.interval);
                if now >= due {
                    if self.state == SaveState::Dirty {
                        self.flush(store, now);
                    }
                    self.next_interval_at = Some(now + self.interval);
                }
            }
            SaveMode::Manual => {}
        }
    }

    /// Flush now if there are unsaved changes, regardless of mode.
    ///
    /// Entry point for lifecycle boundaries (suspend, focus loss, teardown)
    /// and explicit save requests. Returns whether a write succeeded.
    pub fn force_flush(&mut self, store: &SettingsStore, now: f32) -> bool {
        self.observe_changes(store, now);
        if self.state == SaveState::Dirty {
            self.flush(store, now)
        } else {
            false
        }
    }

    /// Pull the store revision and transition `Clean -> Dirty` on change.
    fn observe_changes(&mut self, store: &SettingsStore, now: f32) {
        let revision = store.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.last_change_at = now;
            if self.state == SaveState::Clean {
                self.state = SaveState::Dirty;
            }
        }
    }

    /// Serialize a stable snapshot and hand it to the backend.
    fn flush(&mut self, store: &SettingsStore, now: f32) -> bool {
        self.state = SaveState::Saving;
        let bytes = store.serialize();
        match self.backend.write(&bytes) {
            Ok(()) => {
                self.state = SaveState::Clean;
                self.last_saved_at = Some(now);
                debug!("Flushed {} settings ({} bytes)", store.len(), bytes.len());
                true
            }
            Err(e) => {
                // Unsaved changes are kept; the next trigger retries.
                self.state = SaveState::Dirty;
                warn!("Settings flush failed, will retry: {}", e);
                false
            }
        }
    }
}
