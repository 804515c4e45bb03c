//! Panel clock update system.
//!
//! Advances the shared [`PanelTime`](crate::resources::paneltime::PanelTime)
//! resource once per frame.
use bevy_ecs::prelude::*;

use crate::resources::paneltime::PanelTime;

/// Update elapsed and delta seconds on the `PanelTime` resource.
///
/// `dt` is the unscaled frame delta in seconds. Game-side time scaling is
/// intentionally ignored so debounce and interval windows track real time.
pub fn update_panel_time(world: &mut World, dt: f32) {
    let mut pt = world.resource_mut::<PanelTime>();
    pt.elapsed += dt;
    pt.delta = dt;
}
