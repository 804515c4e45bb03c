//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `paneltime` – unscaled elapsed time driving the scheduler countdowns
//! - `savescheduler` – save-mode policy, save state, and the storage backend
//! - `settingsstore` – tracked key/value settings and their serialization
pub mod paneltime;
pub mod savescheduler;
pub mod settingsstore;
