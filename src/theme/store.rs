//! Theme persistence - a small key-value store plus the system signal.
//!
//! The storyboard only ever uses one key, [`THEME_KEY`], holding `"light"` or
//! `"dark"`. [`FileThemeStore`] keeps it in a JSON settings file;
//! [`MemoryThemeStore`] is for tests and for running without a config
//! directory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

use super::ThemeMode;

/// Settings key of the persisted theme.
pub const THEME_KEY: &str = "theme";

const APP_DIR: &str = "spark-storyboard";
const SETTINGS_FILE: &str = "settings.json";

/// Key-value persistence used by the theme cell.
pub trait ThemeStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// File store
// =============================================================================

/// JSON object on disk, e.g. `{"theme": "dark"}`.
///
/// Other keys, of any JSON type, are left as they are.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/spark-storyboard/settings.json`, if the platform has a
    /// config directory.
    pub fn default_location() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(Error::ThemeStore {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| Error::ThemeFormat {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let io_err = |source| Error::ThemeStore {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(map).map_err(|source| Error::ThemeFormat {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(io_err)
    }
}

impl ThemeStore for FileThemeStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A file that is not a JSON object is replaced rather than blocking the write.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(Error::ThemeFormat { .. }) => Map::new(),
            Err(err) => return Err(err),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }
}

// =============================================================================
// Memory store
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    values: BTreeMap<String, String>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// System signal
// =============================================================================

/// Interpret a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background indices 0-6 and 8 are dark colors; anything else, or no value,
/// means light.
pub fn mode_from_colorfgbg(value: Option<&str>) -> ThemeMode {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(0..=6 | 8) => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

/// The terminal's preferred mode.
pub fn system_mode() -> ThemeMode {
    mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg() {
        assert_eq!(mode_from_colorfgbg(Some("15;0")), ThemeMode::Dark);
        assert_eq!(mode_from_colorfgbg(Some("15;default;8")), ThemeMode::Dark);
        assert_eq!(mode_from_colorfgbg(Some("0;15")), ThemeMode::Light);
        assert_eq!(mode_from_colorfgbg(Some("0;7")), ThemeMode::Light);
        assert_eq!(mode_from_colorfgbg(Some("garbage")), ThemeMode::Light);
        assert_eq!(mode_from_colorfgbg(None), ThemeMode::Light);
    }

    #[test]
    fn test_file_store_missing_file_is_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::new(dir.path().join("settings.json"));
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_set_creates_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut store = FileThemeStore::new(&path);

        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        let reopened = FileThemeStore::new(&path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"other": "x"}"#).unwrap();

        let mut store = FileThemeStore::new(&path);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_file_store_reads_past_non_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme": "dark", "fontSize": 14, "tabs": [2, 4]}"#).unwrap();

        let mut store = FileThemeStore::new(&path);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("fontSize").unwrap(), None);

        store.set(THEME_KEY, "light").unwrap();
        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "light");
        assert_eq!(saved["fontSize"], 14);
        assert_eq!(saved["tabs"], serde_json::json!([2, 4]));
    }

    #[test]
    fn test_file_store_non_object_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2]").unwrap();

        let store = FileThemeStore::new(&path);
        assert!(matches!(store.get(THEME_KEY), Err(Error::ThemeFormat { .. })));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileThemeStore::new(&path);
        assert!(matches!(store.get(THEME_KEY), Err(Error::ThemeFormat { .. })));

        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryThemeStore::new().with(THEME_KEY, "light");
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
