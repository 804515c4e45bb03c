//! Explicit save request event and observer.
//!
//! Triggering a [`SaveRequestEvent`] flushes unsaved settings right away.
//! This is the save path for [`SaveMode::Manual`] (a "Save" button on the
//! panel), but it works in any mode.
//!
//! [`SaveMode::Manual`]: crate::resources::savescheduler::SaveMode::Manual

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::paneltime::PanelTime;
use crate::resources::savescheduler::SaveScheduler;
use crate::resources::settingsstore::SettingsStore;

/// Event used to request an immediate settings flush.
///
/// This carries no data; the observer flushes if anything is dirty.
#[derive(Event, Debug, Clone, Copy)]
pub struct SaveRequestEvent {}

/// Observer that flushes unsaved settings on request.
pub fn save_request_observer(
    _trigger: On<SaveRequestEvent>,
    mut scheduler: ResMut<SaveScheduler>,
    store: Res<SettingsStore>,
    time: Res<PanelTime>,
) {
    debug!("Save requested");
    scheduler.force_flush(&store, time.elapsed);
}
