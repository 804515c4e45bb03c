//! Tweakpanel persistence core.
//!
//! Runtime developer-panel settings for games built on `bevy_ecs`: a
//! tracked key/value store for slider and toggle bindings, a save
//! scheduler that decides when snapshots are written (immediate,
//! debounced, interval, or manual), and pluggable storage backends with a
//! probed file location and a platform fallback.

pub mod backend;
pub mod events;
pub mod resources;
pub mod systems;
