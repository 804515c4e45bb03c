//! File-based settings backend.
//!
//! Resolves its destination directory once, at construction: a preferred,
//! human-accessible directory is probed for write access, and if the probe
//! fails the backend falls back to a guaranteed-writable platform data
//! directory. The decision is made once per session and never re-attempted
//! per flush; [`SettingsBackend::fallback_active`] reports which branch won
//! so a status indicator can surface it.

use super::{BackendError, SettingsBackend};
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name used by [`FileBackend::locate`].
const DEFAULT_FILE_NAME: &str = "tweakpanel.json";

/// Writes snapshots to a single file under a directory resolved at startup.
pub struct FileBackend {
    path: PathBuf,
    fallback_active: bool,
}

impl FileBackend {
    /// Resolve between `preferred_dir` and `fallback_dir`.
    ///
    /// The preferred directory is probed for write access; on failure the
    /// fallback directory is used as-is. The fallback is expected to be
    /// writable by platform contract, so it is not probed; a broken
    /// fallback surfaces as per-flush write errors instead.
    pub fn resolve(
        preferred_dir: impl Into<PathBuf>,
        fallback_dir: impl Into<PathBuf>,
        file_name: &str,
    ) -> Self {
        let preferred = preferred_dir.into();
        if probe_writable(&preferred) {
            FileBackend {
                path: preferred.join(file_name),
                fallback_active: false,
            }
        } else {
            let fallback = fallback_dir.into();
            warn!(
                "Settings directory {:?} is not writable, falling back to {:?}",
                preferred, fallback
            );
            FileBackend {
                path: fallback.join(file_name),
                fallback_active: true,
            }
        }
    }

    /// Resolve the standard locations for an application called `app_name`.
    ///
    /// Preferred: `<current dir>/<app_name>`, next to the game so players
    /// can find and hand-edit the file. Fallback: the platform-local data
    /// directory (or the system temp dir if the platform reports none).
    pub fn locate(app_name: &str) -> Self {
        let preferred = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(app_name);
        let fallback = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(app_name);
        Self::resolve(preferred, fallback, DEFAULT_FILE_NAME)
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write-access probe: create the directory if absent, then write and
/// delete a throwaway marker file.
fn probe_writable(dir: &Path) -> bool {
    if let Err(e) = fs::create_dir_all(dir) {
        debug!("Write probe could not create {:?}: {}", dir, e);
        return false;
    }
    let marker = dir.join(format!(".write_probe_{:08x}", fastrand::u32(..)));
    match fs::write(&marker, b"probe") {
        Ok(()) => {
            let _ = fs::remove_file(&marker);
            true
        }
        Err(e) => {
            debug!("Write probe failed in {:?}: {}", dir, e);
            false
        }
    }
}

impl SettingsBackend for FileBackend {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(BackendError::Io)?;
        }
        fs::write(&self.path, bytes).map_err(BackendError::Io)
    }

    fn read(&mut self) -> Result<Vec<u8>, BackendError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BackendError::NotFound),
            Err(e) => Err(BackendError::Io(e)),
        }
    }

    fn fallback_active(&self) -> bool {
        self.fallback_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tweakpanel_test_{:016x}", fastrand::u64(..)));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolve_prefers_writable_dir() {
        let base = scratch_dir();
        let preferred = base.join("prefs");

        let backend = FileBackend::resolve(&preferred, base.join("fallback"), "settings.json");

        assert!(!backend.fallback_active());
        assert_eq!(backend.path(), preferred.join("settings.json"));

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn test_resolve_falls_back_when_preferred_unwritable() {
        let base = scratch_dir();
        // A regular file in the path makes create_dir_all fail even for root.
        let blocker = base.join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let preferred = blocker.join("prefs");
        let fallback = base.join("fallback");

        let backend = FileBackend::resolve(&preferred, &fallback, "settings.json");

        assert!(backend.fallback_active());
        assert_eq!(backend.path(), fallback.join("settings.json"));

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn test_probe_removes_marker_file() {
        let base = scratch_dir();
        let preferred = base.join("prefs");

        let _backend = FileBackend::resolve(&preferred, base.join("fallback"), "settings.json");

        let leftovers: Vec<_> = fs::read_dir(&preferred)
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert!(leftovers.is_empty(), "probe marker was not cleaned up");

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let base = scratch_dir();
        let mut backend = FileBackend::resolve(base.join("prefs"), base.join("fallback"), "s.json");

        assert!(matches!(backend.read(), Err(BackendError::NotFound)));

        backend.write(b"[]").unwrap();
        assert_eq!(backend.read().unwrap(), b"[]");

        let _ = fs::remove_dir_all(&base);
    }
}
