//! Panel clock resource.
//!
//! Wall-clock style elapsed time driving the save scheduler's countdowns.
//! Deliberately unscaled: pausing or slowing the game must not stretch a
//! debounce window.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct PanelTime {
    /// Seconds since the panel was initialized.
    pub elapsed: f32,
    /// Seconds advanced by the last tick.
    pub delta: f32,
}
