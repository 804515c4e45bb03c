//! Event types and observers used by the persistence core.
//!
//! This module groups the events the host triggers at application
//! boundaries and the corresponding observers that react to them. Events
//! provide a decoupled way for the host to reach the save scheduler
//! without direct dependencies.
//!
//! Submodules:
//! - [`lifecycle`] – suspend/focus-loss/teardown signals forcing a flush
//! - [`saverequest`] – explicit flush request (manual save action)
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod lifecycle;
pub mod saverequest;
