//! Tweak-panel systems.
//!
//! This module groups the ECS systems that advance the persistence core.
//!
//! Submodules overview
//! - [`persistence`] – apply the save-mode policy and flush when due
//! - [`time`] – update the panel clock used by all countdowns

pub mod persistence;
pub mod time;
