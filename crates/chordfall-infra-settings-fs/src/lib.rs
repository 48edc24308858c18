use chordfall_ports::settings::{GameSettings, SettingsError, SettingsPort};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// Reads `GameSettings` from a JSON file. Nothing is ever written back.
pub struct FsSettings {
    path: PathBuf,
}

impl FsSettings {
    /// Looks for `settings.json` inside `base_dir`.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            path: base_dir.join(SETTINGS_FILE),
        }
    }

    pub fn from_file(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_base_dir() -> Result<PathBuf, SettingsError> {
        let base = dirs_next::config_dir()
            .ok_or_else(|| SettingsError::Io("config dir not found".to_string()))?;
        Ok(base.join("Chordfall"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
        let data = fs::read(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_slice(&data).map_err(|e| SettingsError::Serde(e.to_string()))
    }
}

impl Default for FsSettings {
    fn default() -> Self {
        let base_dir = Self::default_base_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base_dir)
    }
}

impl SettingsPort for FsSettings {
    /// A missing file yields the defaults; a malformed one is an error.
    fn load_settings(&self) -> Result<GameSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(GameSettings::default());
        }
        Self::read_json(&self.path)
    }
}
