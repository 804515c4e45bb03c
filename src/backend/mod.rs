//! Storage backends for persisted tweak-panel settings.
//!
//! A backend is a stateless sink: the save scheduler hands it a serialized
//! snapshot and the backend puts the bytes somewhere durable. Two
//! implementations are provided:
//! - [`FileBackend`] – writes a snapshot file, probing for a writable
//!   directory once at startup and falling back to a platform data dir
//! - [`MemoryBackend`] – keeps the snapshot in memory, for headless runs
//!   and tests
//!
//! Hosts with their own storage (an engine key-value store, a cloud save
//! slot) implement [`SettingsBackend`] themselves.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::fmt;
use std::io;

/// Failure modes of a backend read or write.
#[derive(Debug)]
pub enum BackendError {
    /// No snapshot has ever been written. Callers treat this as
    /// "start with empty settings", not as a failure.
    NotFound,
    /// The underlying storage rejected the operation.
    Io(io::Error),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotFound => write!(f, "no saved settings snapshot"),
            BackendError::Io(e) => write!(f, "settings storage error: {}", e),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::NotFound => None,
            BackendError::Io(e) => Some(e),
        }
    }
}

/// Destination for serialized settings snapshots.
///
/// Implementations must not panic on storage failures; they report them
/// through [`BackendError`] and the scheduler retries on its next trigger.
pub trait SettingsBackend: Send + Sync {
    /// Replace the stored snapshot with `bytes`.
    fn write(&mut self, bytes: &[u8]) -> Result<(), BackendError>;

    /// Return the last stored snapshot, or [`BackendError::NotFound`] if
    /// nothing has been written yet.
    fn read(&mut self) -> Result<Vec<u8>, BackendError>;

    /// Whether this backend ended up on its fallback location.
    ///
    /// Only meaningful for backends that resolve between a preferred and a
    /// fallback destination; everything else reports `false`.
    fn fallback_active(&self) -> bool {
        false
    }
}
