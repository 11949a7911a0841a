//! Persistent key-value store
//!
//! Preferences and the open document are kept as named string slots. The
//! on-disk form is a single flat JSON object in the platform configuration
//! directory, rewritten on every change with a write-then-rename so a crash
//! never leaves a half-written file behind.

use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "mdexpress";

/// Storage file name
const STORAGE_FILE_NAME: &str = "storage.json";

/// Temporary file name used during atomic writes
const STORAGE_BACKUP_NAME: &str = "storage.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Synchronous string-keyed storage that survives restarts.
pub trait KeyValueStore {
    /// Read a slot. `None` if it was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot, persisting it before returning.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\mdexpress\`
/// - **macOS**: `~/Library/Application Support/mdexpress/`
/// - **Linux**: `~/.config/mdexpress/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the storage file.
pub fn get_storage_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(STORAGE_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// File Store
// ─────────────────────────────────────────────────────────────────────────────

/// Key-value store backed by a JSON file.
///
/// The whole map is held in memory; each write serializes it back to disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at the default location.
    ///
    /// Never fails: an unreadable or corrupt file is logged and replaced by an
    /// empty store. If no config directory exists at all, writes go to a file
    /// in the working directory.
    pub fn open_default() -> Self {
        let path = get_storage_file_path()
            .unwrap_or_warn_default(PathBuf::from(STORAGE_FILE_NAME), "No config directory");
        Self::open_or_empty(path)
    }

    /// Open the store at `path`, falling back to an empty map on errors.
    pub fn open_or_empty(path: PathBuf) -> Self {
        let entries = load_entries(&path)
            .unwrap_or_warn_default(BTreeMap::new(), "Failed to load storage");
        debug!("Storage file: {}", path.display());
        Self { path, entries }
    }

    /// Open the store at `path`, reporting read and parse errors.
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = load_entries(&path)?;
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);

        if let Some(dir) = dir.as_ref() {
            if !dir.exists() {
                debug!("Creating storage directory: {}", dir.display());
                fs::create_dir_all(dir).map_err(|e| Error::StoreSave {
                    path: dir.clone(),
                    source: Box::new(e),
                })?;
            }
        }

        let backup_path = self.path.with_file_name(STORAGE_BACKUP_NAME);

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| Error::StoreSave {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        fs::write(&backup_path, &json).map_err(|e| Error::StoreSave {
            path: backup_path.clone(),
            source: Box::new(e),
        })?;

        fs::rename(&backup_path, &self.path).map_err(|e| Error::StoreSave {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        debug!("Storage written to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Read the storage map from disk. Missing or blank files are empty stores.
fn load_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        debug!("Storage file not found at {}, starting empty", path.display());
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::StoreLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let entries: BTreeMap<String, String> = serde_json::from_str(&contents).map_err(|e| {
        warn!(
            "Storage file at {} contains invalid JSON: {}",
            path.display(),
            e
        );
        Error::StoreParse {
            message: format!("Failed to parse storage file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Loaded {} stored values from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// Volatile store, for tests and for running without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Write a slot and log instead of failing.
///
/// Returns `true` if the value was persisted.
pub fn set_silent(store: &mut dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to persist '{}': {}", key, e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_path(dir: &TempDir) -> PathBuf {
        dir.path().join(APP_NAME).join(STORAGE_FILE_NAME)
    }

    #[test]
    fn test_get_config_dir_contains_app_name() {
        if let Ok(path) = get_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(storage_path(&dir)).unwrap();
        assert_eq!(store.get("app_lang"), None);
    }

    #[test]
    fn test_set_creates_directory_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(&dir);

        let mut store = FileStore::open(path.clone()).unwrap();
        store.set("app_lang", "pt").unwrap();
        store.set("markdown_editor_content", "# Título\n").unwrap();

        assert!(path.exists());
        assert!(!path.with_file_name(STORAGE_BACKUP_NAME).exists());

        let reopened = FileStore::open(path).unwrap();
        assert_eq!(reopened.get("app_lang").as_deref(), Some("pt"));
        assert_eq!(
            reopened.get("markdown_editor_content").as_deref(),
            Some("# Título\n")
        );
    }

    #[test]
    fn test_empty_string_is_stored() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(&dir);

        let mut store = FileStore::open(path.clone()).unwrap();
        store.set("markdown_editor_content", "").unwrap();

        let reopened = FileStore::open(path).unwrap();
        assert_eq!(reopened.get("markdown_editor_content").as_deref(), Some(""));
    }

    #[test]
    fn test_remove_slot() {
        let dir = TempDir::new().unwrap();
        let path = storage_path(&dir);

        let mut store = FileStore::open(path.clone()).unwrap();
        store.set("app_theme", "dark").unwrap();
        store.remove("app_theme").unwrap();
        store.remove("never_written").unwrap();

        assert_eq!(FileStore::open(path).unwrap().get("app_theme"), None);
    }

    #[test]
    fn test_blank_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        fs::write(&path, "  \n").unwrap();

        let store = FileStore::open(path).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_corrupt_file_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let result = FileStore::open(path.clone());
        assert!(matches!(result, Err(Error::StoreParse { .. })));

        let store = FileStore::open_or_empty(path);
        assert_eq!(store.get("app_lang"), None);
    }

    #[test]
    fn test_non_string_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        fs::write(&path, r#"{"app_lang": 3}"#).unwrap();

        assert!(FileStore::open(path).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(set_silent(&mut store, "k", "v"));
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }
}
