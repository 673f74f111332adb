//! Preference Store
//!
//! The dashboard persists a handful of per-user values between sessions
//! (display name, theme, last city, footprint records). Persistence is
//! an injected key-value interface so the computational core stays free
//! of any global state; callers pick the backing store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::footprint::FootprintLog;

/// Saved display name
pub const KEY_USER: &str = "cg_user";

/// Saved theme ("dark" or "light")
pub const KEY_THEME: &str = "cg_theme";

/// Most recently queried city
pub const KEY_LAST_CITY: &str = "cg_lastcity";

/// JSON-encoded footprint record log
pub const KEY_RECORDS: &str = "cg_records";

/// Errors from preference persistence.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("preference storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Injected read/write interface for small string preferences.
pub trait PreferenceStore {
    /// Fetch a value, `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;

    /// Set or replace a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object, written through on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing values. A missing file
    /// starts the store empty; it is created on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    fn persist(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Display theme. Dark is the default for new users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored value; anything unrecognized falls back to dark.
    pub fn from_saved(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Typed façade over a [`PreferenceStore`] for the dashboard's keys.
#[derive(Debug)]
pub struct Preferences<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn display_name(&self) -> Result<Option<String>, PrefsError> {
        self.store.get(KEY_USER)
    }

    pub fn set_display_name(&mut self, name: &str) -> Result<(), PrefsError> {
        self.store.set(KEY_USER, name)
    }

    /// Greeting line for the header bar.
    pub fn greeting(&self) -> Result<String, PrefsError> {
        Ok(match self.display_name()? {
            Some(name) => format!("Welcome back, {}", name),
            None => "Welcome — Guest".to_string(),
        })
    }

    pub fn theme(&self) -> Result<Theme, PrefsError> {
        Ok(self
            .store
            .get(KEY_THEME)?
            .map(|v| Theme::from_saved(&v))
            .unwrap_or_default())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PrefsError> {
        self.store.set(KEY_THEME, theme.as_str())
    }

    /// Flip between dark and light, persist, and return the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, PrefsError> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn last_city(&self) -> Result<Option<String>, PrefsError> {
        self.store.get(KEY_LAST_CITY)
    }

    pub fn set_last_city(&mut self, city: &str) -> Result<(), PrefsError> {
        self.store.set(KEY_LAST_CITY, city)
    }

    /// Load the saved footprint log; empty if none was saved yet.
    pub fn footprint_log(&self) -> Result<FootprintLog, PrefsError> {
        match self.store.get(KEY_RECORDS)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(FootprintLog::new()),
        }
    }

    pub fn save_footprint_log(&mut self, log: &FootprintLog) -> Result<(), PrefsError> {
        self.store.set(KEY_RECORDS, &serde_json::to_string(log)?)
    }
}
