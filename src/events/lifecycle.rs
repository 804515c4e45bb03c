//! App lifecycle events and observers forcing a settings flush.
//!
//! The host forwards its lifecycle boundaries (suspend, focus loss,
//! teardown) by triggering these events. Each observer asks the
//! [`SaveScheduler`] for an immediate flush attempt; if nothing is dirty
//! the attempt is a no-op. This applies in every save mode, including
//! [`Manual`](crate::resources::savescheduler::SaveMode::Manual): a
//! process about to go away is the one trigger no mode may ignore.
//!
//! [`SaveScheduler`]: crate::resources::savescheduler::SaveScheduler

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::paneltime::PanelTime;
use crate::resources::savescheduler::SaveScheduler;
use crate::resources::settingsstore::SettingsStore;

/// The app is being suspended (mobile background, console rest mode).
#[derive(Event, Debug, Clone, Copy)]
pub struct AppSuspendEvent {}

/// The app window lost input focus.
#[derive(Event, Debug, Clone, Copy)]
pub struct AppFocusLostEvent {}

/// The app is shutting down.
#[derive(Event, Debug, Clone, Copy)]
pub struct AppTeardownEvent {}

/// Flush unsaved settings when the app suspends.
pub fn suspend_observer(
    _trigger: On<AppSuspendEvent>,
    mut scheduler: ResMut<SaveScheduler>,
    store: Res<SettingsStore>,
    time: Res<PanelTime>,
) {
    debug!("App suspend, flushing settings");
    scheduler.force_flush(&store, time.elapsed);
}

/// Flush unsaved settings when the window loses focus.
pub fn focus_lost_observer(
    _trigger: On<AppFocusLostEvent>,
    mut scheduler: ResMut<SaveScheduler>,
    store: Res<SettingsStore>,
    time: Res<PanelTime>,
) {
    debug!("Focus lost, flushing settings");
    scheduler.force_flush(&store, time.elapsed);
}

/// Flush unsaved settings on shutdown.
pub fn teardown_observer(
    _trigger: On<AppTeardownEvent>,
    mut scheduler: ResMut<SaveScheduler>,
    store: Res<SettingsStore>,
    time: Res<PanelTime>,
) {
    debug!("App teardown, flushing settings");
    scheduler.force_flush(&store, time.elapsed);
}
