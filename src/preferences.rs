//! # Display Preferences
//!
//! The only state that outlives a session is the light/dark display mode,
//! stored under the key `theme` as `"dark"` or `"light"`. It is read once at
//! startup and written whenever it changes.
//!
//! Storage is abstracted behind [`PreferenceSource`] and [`PreferenceSink`] so
//! the desktop front-end can use eframe's storage while the console keeps a
//! small JSON file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon for the toggle control: the mode you would switch to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "🌙",
        }
    }
}

pub trait PreferenceSource {
    fn read(&self, key: &str) -> Option<String>;
}

pub trait PreferenceSink {
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Reads the stored theme, falling back to dark for missing or unknown values.
pub fn load_theme(source: &dyn PreferenceSource) -> Theme {
    match source.read(THEME_KEY) {
        Some(value) => Theme::parse(&value).unwrap_or_else(|| {
            warn!(value = %value, "unknown stored theme, using default");
            Theme::default()
        }),
        None => Theme::default(),
    }
}

pub fn save_theme(sink: &mut dyn PreferenceSink, theme: Theme) -> Result<()> {
    sink.write(THEME_KEY, theme.as_str())?;
    debug!(theme = theme.as_str(), "theme preference saved");
    Ok(())
}

/// In-memory store for callers that need no persistence, such as tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceSource for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl PreferenceSink for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk, e.g. `{"theme": "light"}`. Keys this crate does not
/// own are kept as they are, whatever their value type.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file yields an empty store; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read_values(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable preference file");
                Map::new()
            }
        };
        Self { path, values }
    }

    fn read_values(path: &Path) -> Result<Map<String, Value>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl PreferenceSource for JsonFileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(str::to_string)
    }
}

impl PreferenceSink for JsonFileStore {
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.persist()
    }
}

/// Platform config location for the console preference file.
pub fn default_preferences_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "FlipFlopLab", "flipflop_lab")
        .map(|dirs| dirs.config_dir().join("preferences.json"))
}
