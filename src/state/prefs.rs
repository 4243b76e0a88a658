/// Persisted user preferences
///
/// The theme choice (and the alignment endpoint) survive restarts as a
/// small JSON file in the user's config directory:
/// - Linux: ~/.config/thermal-align/preferences.json
/// - macOS: ~/Library/Application Support/thermal-align/preferences.json
/// - Windows: %APPDATA%\thermal-align\preferences.json

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Endpoint of a locally running alignment service
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/align";

/// The user's theme choice
///
/// Light is the default for first launches and whenever no stored
/// preference can be read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The opposite preference (a toggle click)
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Map the preference onto one of iced's built-in themes
    pub fn to_theme(self) -> iced::Theme {
        match self {
            ThemePreference::Light => iced::Theme::Light,
            ThemePreference::Dark => iced::Theme::Dark,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
        }
    }
}

/// Everything the client persists between runs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Theme applied at startup and flipped by the toggle button
    #[serde(default)]
    pub theme: ThemePreference,
    /// Where alignment requests are posted
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: ThemePreference::default(),
            server_url: default_server_url(),
        }
    }
}

/// Storage backing for preferences
///
/// The app talks to this trait rather than the filesystem directly, so
/// tests can swap in an in-memory store.
pub trait PrefsStore {
    /// Read stored preferences. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> Result<Option<Preferences>, String>;

    /// Persist preferences, replacing whatever was stored before.
    fn save(&self, prefs: &Preferences) -> Result<(), String>;
}

/// JSON-file store under the user's config directory
#[derive(Debug)]
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    /// Store at the platform's config location
    pub fn at_default_location() -> Result<Self, String> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| "Could not determine a config directory".to_string())?;

        path.push("thermal-align");
        path.push("preferences.json");

        Ok(DiskStore { path })
    }

    /// Store at an explicit path
    pub fn at(path: PathBuf) -> Self {
        DiskStore { path }
    }

    /// Where this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefsStore for DiskStore {
    fn load(&self) -> Result<Option<Preferences>, String> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;

        let prefs = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))?;

        Ok(Some(prefs))
    }

    fn save(&self, prefs: &Preferences) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| format!("Failed to serialize preferences: {}", e))?;

        std::fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}
