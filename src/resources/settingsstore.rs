//! Tracked settings store resource.
//!
//! The [`SettingsStore`] holds the current value of every tweak-panel
//! binding: sliders map to [`SettingValue::Float`], toggles to
//! [`SettingValue::Bool`]. Keys are caller-supplied strings, typically
//! `"<group>.<name>"` like `"Movement.Speed"`.
//!
//! The store owns the on-disk encoding: a human-editable JSON list of
//! entries, serialized in registration order so output is deterministic
//! across runs. Float values are rounded to a configurable decimal
//! precision before encoding, which keeps snapshots stable in the face of
//! floating-point noise from slider drags.
//!
//! Dirty tracking is revision-based: [`SettingsStore::set`] bumps an
//! internal revision counter only when a value actually changes, and the
//! save scheduler compares revisions per tick. Writing the same value twice
//! is a no-op and never marks the settings dirty.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept for float values unless overridden.
const DEFAULT_PRECISION: u32 = 3;

/// One tracked value, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SettingValue {
    /// Slider-style numeric value.
    Float(f64),
    /// Toggle-style flag.
    Bool(bool),
}

impl SettingValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(v) => Some(*v),
            SettingValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Float(_) => None,
            SettingValue::Bool(v) => Some(*v),
        }
    }
}

/// One persisted key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    /// Unique key within a snapshot.
    pub key: String,
    /// Tagged payload.
    #[serde(flatten)]
    pub value: SettingValue,
}

impl SettingEntry {
    fn rounded(&self, precision: u32) -> SettingEntry {
        match self.value {
            SettingValue::Float(v) => SettingEntry {
                key: self.key.clone(),
                value: SettingValue::Float(round_to(v, precision)),
            },
            SettingValue::Bool(_) => self.clone(),
        }
    }
}

/// Malformed persisted data: truncated input, an unknown kind tag, or an
/// unparsable value. Recovered by discarding the snapshot and starting
/// empty; never fatal.
#[derive(Debug)]
pub struct DecodeError(serde_json::Error);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed settings snapshot: {}", self.0)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Round half away from zero to `precision` decimal places.
fn round_to(v: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (v * factor).round() / factor
}

/// In-memory settings map with deterministic serialization.
///
/// Entries keep their registration order; keys are unique with
/// last-write-wins semantics on re-registration.
#[derive(Resource, Debug, Clone)]
pub struct SettingsStore {
    entries: Vec<SettingEntry>,
    index: FxHashMap<String, usize>,
    precision: u32,
    revision: u64,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Create an empty store with the default float precision.
    pub fn new() -> Self {
        SettingsStore {
            entries: Vec::new(),
            index: FxHashMap::default(),
            precision: DEFAULT_PRECISION,
            revision: 0,
        }
    }

    /// Create an empty store keeping `precision` decimal places on floats.
    pub fn with_precision(precision: u32) -> Self {
        SettingsStore {
            precision,
            ..Self::new()
        }
    }

    /// Insert or overwrite a value.
    ///
    /// Returns whether the stored value actually changed. Setting a key to
    /// its current value (same kind, equal payload) is a no-op and does not
    /// bump the revision, so the save scheduler never sees it.
    ///
    /// Non-finite floats (`NaN`, infinities) are rejected as no-ops: they
    /// have no JSON representation, so accepting one would produce a
    /// snapshot that cannot be decoded on the next session.
    pub fn set(&mut self, key: impl Into<String>, value: SettingValue) -> bool {
        let key = key.into();
        if let SettingValue::Float(v) = value {
            if !v.is_finite() {
                log::warn!("Rejecting non-finite value {} for setting {:?}", v, key);
                return false;
            }
        }
        match self.index.get(&key) {
            Some(&i) => {
                if self.entries[i].value == value {
                    return false;
                }
                self.entries[i].value = value;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(SettingEntry { key, value });
            }
        }
        self.revision += 1;
        true
    }

    /// Insert or overwrite a float value. See [`SettingsStore::set`].
    pub fn set_float(&mut self, key: impl Into<String>, value: f64) -> bool {
        self.set(key, SettingValue::Float(value))
    }

    /// Insert or overwrite a bool value. See [`SettingsStore::set`].
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> bool {
        self.set(key, SettingValue::Bool(value))
    }

    /// Look up a value. `None` means the key is not tracked yet, never an
    /// error.
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.index.get(key).map(|&i| self.entries[i].value)
    }

    /// Look up a float value; `None` if absent or not a float.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_float())
    }

    /// Look up a bool value; `None` if absent or not a bool.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Read-only view of all entries in registration order.
    pub fn entries(&self) -> &[SettingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change counter, bumped once per accepted [`SettingsStore::set`].
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Configured float precision in decimal places.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Encode the current snapshot as human-editable JSON.
    ///
    /// Entries appear in registration order and floats are rounded to the
    /// configured precision, so the output is byte-stable across runs.
    pub fn serialize(&self) -> Vec<u8> {
        let rounded: Vec<SettingEntry> = self
            .entries
            .iter()
            .map(|e| e.rounded(self.precision))
            .collect();
        match serde_json::to_vec_pretty(&rounded) {
            Ok(mut bytes) => {
                bytes.push(b'\n');
                bytes
            }
            Err(e) => {
                log::error!("Failed to encode settings snapshot: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the store contents with a decoded snapshot.
    ///
    /// Duplicate keys in the input resolve last-write-wins. A successful
    /// replace bumps the revision so schedulers observe the new contents;
    /// on any decode failure the store's prior in-memory state is left
    /// untouched.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let parsed: Vec<SettingEntry> = serde_json::from_slice(bytes).map_err(DecodeError)?;

        let mut entries: Vec<SettingEntry> = Vec::with_capacity(parsed.len());
        let mut index = FxHashMap::default();
        for entry in parsed {
            match index.get(&entry.key) {
                Some(&i) => entries[i] = entry,
                None => {
                    index.insert(entry.key.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        self.entries = entries;
        self.index = index;
        self.revision += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== SET / GET TESTS ====================

    #[test]
    fn test_set_inserts_and_reports_change() {
        let mut store = SettingsStore::new();
        assert!(store.set_float("Movement.Speed", 5.0));
        assert!(store.set_bool("Audio.Muted", true));

        assert!(approx_eq(store.get_float("Movement.Speed").unwrap(), 5.0));
        assert_eq!(store.get_bool("Audio.Muted"), Some(true));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_set_same_value_is_no_op() {
        let mut store = SettingsStore::new();
        store.set_float("Movement.Speed", 5.0);
        let revision = store.revision();

        assert!(!store.set_float("Movement.Speed", 5.0));
        assert_eq!(store.revision(), revision);

        assert!(store.set_float("Movement.Speed", 7.25));
        assert_eq!(store.revision(), revision + 1);
    }

    #[test]
    fn test_set_replaces_kind_last_write_wins() {
        let mut store = SettingsStore::new();
        store.set_float("Debug.Mode", 1.0);
        assert!(store.set_bool("Debug.Mode", true));

        assert_eq!(store.get("Debug.Mode"), Some(SettingValue::Bool(true)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_rejects_non_finite_floats() {
        let mut store = SettingsStore::new();
        store.set_float("Camera.Shake", 0.5);
        let revision = store.revision();

        assert!(!store.set_float("Camera.Shake", f64::NAN));
        assert!(!store.set_float("Camera.Shake", f64::INFINITY));
        assert!(!store.set_float("Camera.Shake", f64::NEG_INFINITY));
        assert_eq!(store.revision(), revision);
        assert_eq!(store.get_float("Camera.Shake"), Some(0.5));

        // The snapshot still decodes on the next session.
        let bytes = store.serialize();
        let mut restored = SettingsStore::new();
        restored.deserialize(&bytes).unwrap();
        assert_eq!(restored.get_float("Camera.Shake"), Some(0.5));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = SettingsStore::new();
        assert_eq!(store.get("Nope"), None);
        assert_eq!(store.get_float("Nope"), None);
    }

    #[test]
    fn test_get_kind_mismatch_is_none() {
        let mut store = SettingsStore::new();
        store.set_bool("Audio.Muted", false);
        assert_eq!(store.get_float("Audio.Muted"), None);
        assert_eq!(store.get_bool("Audio.Muted"), Some(false));
    }

    // ==================== SERIALIZATION TESTS ====================

    #[test]
    fn test_serialize_keeps_registration_order() {
        let mut store = SettingsStore::new();
        store.set_float("Zoom.Level", 2.0);
        store.set_bool("Audio.Muted", false);
        store.set_float("Movement.Speed", 5.0);

        let text = String::from_utf8(store.serialize()).unwrap();
        let zoom = text.find("Zoom.Level").unwrap();
        let muted = text.find("Audio.Muted").unwrap();
        let speed = text.find("Movement.Speed").unwrap();
        assert!(zoom < muted && muted < speed);
    }

    #[test]
    fn test_serialize_rounds_floats_to_precision() {
        let mut store = SettingsStore::with_precision(3);
        assert_eq!(store.precision(), 3);
        store.set_float("Movement.Speed", 7.2504321);

        let text = String::from_utf8(store.serialize()).unwrap();
        assert!(text.contains("7.25"), "snapshot was: {}", text);
        assert!(!text.contains("7.2504321"));
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let mut store = SettingsStore::new();
        store.set_float("A.One", 1.5);
        store.set_bool("B.Two", true);

        assert_eq!(store.serialize(), store.serialize());
    }

    #[test]
    fn test_roundtrip_preserves_prerounded_snapshot() {
        let mut store = SettingsStore::new();
        store.set_float("Movement.Speed", 7.25);
        store.set_bool("Audio.Muted", true);
        store.set_float("Camera.Fov", 90.0);

        let bytes = store.serialize();
        let mut restored = SettingsStore::new();
        restored.deserialize(&bytes).unwrap();

        assert_eq!(restored.entries(), store.entries());
    }

    #[test]
    fn test_deserialize_bumps_revision() {
        let mut store = SettingsStore::new();
        let revision = store.revision();

        store
            .deserialize(br#"[ { "key": "Movement.Speed", "kind": "float", "value": 5.0 } ]"#)
            .unwrap();

        assert!(store.revision() > revision);
    }

    #[test]
    fn test_deserialize_duplicate_keys_last_write_wins() {
        let mut store = SettingsStore::new();
        let bytes = br#"[
            { "key": "Movement.Speed", "kind": "float", "value": 1.0 },
            { "key": "Movement.Speed", "kind": "float", "value": 2.0 }
        ]"#;
        store.deserialize(bytes).unwrap();

        assert_eq!(store.len(), 1);
        assert!(approx_eq(store.get_float("Movement.Speed").unwrap(), 2.0));
    }

    // ==================== DECODE FAILURE TESTS ====================

    #[test]
    fn test_deserialize_truncated_input_fails() {
        let mut store = SettingsStore::new();
        let err = store.deserialize(b"[ { \"key\": \"Movement.Spee").unwrap_err();
        assert!(err.to_string().contains("malformed settings snapshot"));
    }

    #[test]
    fn test_deserialize_unknown_kind_tag_fails() {
        let mut store = SettingsStore::new();
        let bytes = br#"[ { "key": "X", "kind": "vector", "value": 1.0 } ]"#;
        assert!(store.deserialize(bytes).is_err());
    }

    #[test]
    fn test_deserialize_unparsable_value_fails() {
        let mut store = SettingsStore::new();
        let bytes = br#"[ { "key": "X", "kind": "float", "value": "fast" } ]"#;
        assert!(store.deserialize(bytes).is_err());
    }

    #[test]
    fn test_failed_deserialize_leaves_store_untouched() {
        let mut store = SettingsStore::new();
        store.set_float("Movement.Speed", 5.0);
        store.set_bool("Audio.Muted", true);
        let before = store.entries().to_vec();

        assert!(store.deserialize(b"not json at all").is_err());
        assert_eq!(store.entries(), &before[..]);
    }
}
