//! In-memory settings backend.
//!
//! Stands in for engine-managed key-value storage: the snapshot lives in
//! process memory and disappears with it. Useful for headless runs, tests,
//! and hosts that persist the bytes themselves on their own schedule.

use super::{BackendError, SettingsBackend};

/// Keeps the last written snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    snapshot: Option<Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend { snapshot: None }
    }

    /// The last written snapshot, if any.
    pub fn snapshot(&self) -> Option<&[u8]> {
        self.snapshot.as_deref()
    }
}

impl SettingsBackend for MemoryBackend {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BackendError> {
        self.snapshot = Some(bytes.to_vec());
        Ok(())
    }

    fn read(&mut self) -> Result<Vec<u8>, BackendError> {
        self.snapshot.clone().ok_or(BackendError::NotFound)
    }
}
