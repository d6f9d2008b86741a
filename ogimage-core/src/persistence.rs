//! Persistence Adapter - Partialize and Rehydrate
//!
//! Only content, style and advanced options survive to storage. UI state is
//! session-only. Snapshots carry no schema version: rehydration merges the
//! stored record over the defaults one field at a time, so fields added later
//! take their default and fields that no longer parse are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

use crate::model::{AdvancedRecord, AppState, ContentRecord, ExtendedField, StyleRecord, UiState};

/// Namespace key the snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "og-generator-storage";

/// Snapshot keys besides the extended content fields.
const RECORD_KEYS: [&str; 10] = [
    "title",
    "description",
    "icon",
    "template",
    "backgroundColor",
    "textColor",
    "accentColor",
    "fontFamily",
    "fontSize",
    "layout",
];

fn is_snapshot_key(key: &str) -> bool {
    RECORD_KEYS.contains(&key) || ExtendedField::from_key(key).is_some()
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Durable string slots addressed by key.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-process storage. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per slot under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    /// Temp file + rename so a crash never leaves a half-written snapshot.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(value.as_bytes()).map_err(|e| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::Io {
            operation: "rename",
            path: path.clone(),
            source: e,
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io {
                operation: "remove",
                path,
                source: e,
            }),
        }
    }
}

/// The whitelisted subset of [`AppState`] written to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(flatten)]
    pub content: ContentRecord,
    #[serde(flatten)]
    pub style: StyleRecord,
    #[serde(flatten)]
    pub advanced: AdvancedRecord,
}

impl PersistedState {
    /// Allow-list transform applied at the serialization boundary.
    pub fn partialize(state: &AppState) -> Self {
        Self {
            content: state.content.clone(),
            style: state.style.clone(),
            advanced: state.advanced,
        }
    }

    /// Rebuild a full state; UI state always starts from defaults.
    pub fn into_state(self) -> AppState {
        AppState {
            content: self.content,
            style: self.style,
            advanced: self.advanced,
            ui: UiState::default(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Merge a stored payload over the defaults. Never fails.
    pub fn merge_over_defaults(stored: &str) -> Self {
        let incoming = match serde_json::from_str::<Value>(stored) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("persisted snapshot is not an object, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted snapshot is unreadable, using defaults");
                return Self::default();
            }
        };

        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let total = incoming.len();
        let known: Vec<(String, Value)> = incoming
            .into_iter()
            .filter(|(key, _)| is_snapshot_key(key))
            .collect();
        if known.len() < total {
            tracing::debug!(ignored = total - known.len(), "ignoring unknown persisted keys");
        }

        // At most one pass per snapshot key, each over a map of bounded size.
        for (key, value) in known {
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value);
            match serde_json::from_value::<Self>(Value::Object(candidate.clone())) {
                Ok(_) => merged = candidate,
                Err(e) => tracing::warn!(key = %key, error = %e, "dropping unreadable persisted field"),
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_default()
    }
}

/// Storage backend bound to a namespace key.
pub struct Persistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl Persistence {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&mut self, state: &AppState) -> Result<()> {
        let json = PersistedState::partialize(state).to_json()?;
        self.storage.set_item(&self.key, &json)
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<PersistedState>> {
        Ok(self
            .storage
            .get_item(&self.key)?
            .map(|stored| PersistedState::merge_over_defaults(&stored)))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }

    /// Startup state: the stored snapshot merged over defaults, or the
    /// defaults alone when storage is empty or unreadable.
    pub fn rehydrate(&self) -> AppState {
        match self.load() {
            Ok(Some(snapshot)) => {
                tracing::info!(key = %self.key, "rehydrated design state");
                snapshot.into_state()
            }
            Ok(None) => AppState::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read persisted state, using defaults");
                AppState::default()
            }
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layout;
    use crate::templates::TemplateId;
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_is_flat_and_excludes_ui() {
        let mut state = AppState::default();
        state.ui.is_generating = true;
        state.content.extended.set(ExtendedField::Tag, Some("X".into()));

        let value: Value = serde_json::from_str(&PersistedState::partialize(&state).to_json().unwrap()).unwrap();
        assert_eq!(value["title"], "Build faster with Next.js");
        assert_eq!(value["template"], "gradient");
        assert_eq!(value["fontFamily"], "inter");
        assert_eq!(value["tag"], "X");
        assert!(value.get("isGenerating").is_none());
        assert!(value.get("ui").is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let snapshot = PersistedState::merge_over_defaults(r#"{"title":"Old save","template":"bold"}"#);
        assert_eq!(snapshot.content.title, "Old save");
        assert_eq!(snapshot.content.icon, "⚡");
        assert_eq!(snapshot.style.template, TemplateId::Bold);
        assert_eq!(snapshot.advanced.layout, Layout::Center);
    }

    #[test]
    fn test_unreadable_field_is_dropped() {
        let snapshot = PersistedState::merge_over_defaults(
            r#"{"title":"Kept","template":"carousel","fontSize":"huge","tag":"T","legacyField":1}"#,
        );
        assert_eq!(snapshot.content.title, "Kept");
        assert_eq!(snapshot.style.template, TemplateId::Gradient);
        assert_eq!(snapshot.advanced, AdvancedRecord::default());
        assert_eq!(snapshot.content.extended.get(ExtendedField::Tag), Some("T"));
    }

    #[test]
    fn test_many_unknown_keys_are_ignored() {
        let mut payload = Map::new();
        payload.insert("title".into(), Value::from("Legacy"));
        payload.insert("tagline".into(), Value::from("Still here"));
        for i in 0..20_000 {
            payload.insert(format!("legacy{i}"), Value::from(i));
        }
        let stored = Value::Object(payload).to_string();

        let snapshot = PersistedState::merge_over_defaults(&stored);
        assert_eq!(snapshot.content.title, "Legacy");
        assert_eq!(snapshot.content.extended.get(ExtendedField::Tagline), Some("Still here"));
        assert_eq!(snapshot.style, StyleRecord::default());

        let rewritten: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert!(rewritten.get("legacy0").is_none());
    }

    #[test]
    fn test_snapshot_keys_cover_serialized_form() {
        let mut state = AppState::default();
        for field in ExtendedField::ALL {
            state.content.extended.set(field, Some("x".into()));
        }
        let value: Value = serde_json::from_str(&PersistedState::partialize(&state).to_json().unwrap()).unwrap();
        for key in value.as_object().unwrap().keys() {
            assert!(is_snapshot_key(key), "{key}");
        }
    }

    #[test]
    fn test_garbage_payload_falls_back() {
        assert_eq!(PersistedState::merge_over_defaults("not json"), PersistedState::default());
        assert_eq!(PersistedState::merge_over_defaults("[1,2]"), PersistedState::default());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("state"));

        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
        storage.set_item(DEFAULT_STORAGE_KEY, "{}").unwrap();
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("state/og-generator-storage.json").exists());

        storage.remove_item(DEFAULT_STORAGE_KEY).unwrap();
        storage.remove_item(DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.get_item("../escape"),
            Err(PersistenceError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_memory_storage_shares_slots() {
        let storage = MemoryStorage::new();
        let mut persistence = Persistence::new(storage.clone());
        persistence.save(&AppState::default()).unwrap();
        assert_eq!(storage.len(), 1);

        persistence.clear().unwrap();
        assert!(storage.is_empty());
    }
}
