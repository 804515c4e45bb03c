//! Persistence policy tick system.
//!
//! Runs once per frame on the host's update loop and advances the
//! [`SaveScheduler`]: pulls the current [`SettingsStore`] revision, applies
//! the configured save-mode policy, and flushes to the backend when a
//! countdown elapses. The system never blocks; countdowns are compared
//! against [`PanelTime::elapsed`].
//!
//! [`PanelTime::elapsed`]: crate::resources::paneltime::PanelTime

use bevy_ecs::prelude::*;

use crate::resources::paneltime::PanelTime;
use crate::resources::savescheduler::SaveScheduler;
use crate::resources::settingsstore::SettingsStore;

/// Advance the save scheduler by one tick.
///
/// # Resource Dependencies
/// - `PanelTime` - current panel clock
/// - `SaveScheduler` (mutable) - policy state and backend
/// - `SettingsStore` - tracked values, read for revision and snapshot
pub fn persistence_tick(
    time: Res<PanelTime>,
    mut scheduler: ResMut<SaveScheduler>,
    store: Res<SettingsStore>,
) {
    scheduler.tick(&store, time.elapsed);
}
