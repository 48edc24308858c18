use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MIN_SPAWN_INTERVAL_MS: TimeMs = 100;

fn default_game_modes() -> BTreeSet<TargetKind> {
    BTreeSet::from([TargetKind::Chord])
}

fn default_chord_length() -> usize {
    3
}

fn default_chord_roots() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_spawn_speed_ms() -> TimeMs {
    10_000
}

fn default_spawn_interval_ms() -> TimeMs {
    5_000
}

fn default_max_hearts() -> u32 {
    3
}

fn default_mode_key() -> String {
    "C".to_string()
}

fn default_mode_scale_name() -> String {
    "major".to_string()
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serde(String),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    #[serde(default = "default_game_modes")]
    pub game_modes: BTreeSet<TargetKind>,
    #[serde(default = "default_chord_length")]
    pub chord_length: usize,
    pub chord_complexity: Complexity,
    #[serde(default = "default_chord_roots")]
    pub chord_roots: Vec<String>,
    /// Fall time of a target, used as its countdown.
    #[serde(default = "default_spawn_speed_ms")]
    pub spawn_speed_ms: TimeMs,
    /// Spawn cadence at level 1.
    #[serde(default = "default_spawn_interval_ms")]
    pub spawn_interval_ms: TimeMs,
    pub inversions_enabled: bool,
    pub use_hearts: bool,
    #[serde(default = "default_max_hearts")]
    pub max_hearts: u32,
    pub key_constrained_mode: bool,
    #[serde(default = "default_mode_key")]
    pub mode_key: String,
    #[serde(default = "default_mode_scale_name")]
    pub mode_scale_name: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_modes: default_game_modes(),
            chord_length: default_chord_length(),
            chord_complexity: Complexity::Simple,
            chord_roots: default_chord_roots(),
            spawn_speed_ms: default_spawn_speed_ms(),
            spawn_interval_ms: default_spawn_interval_ms(),
            inversions_enabled: false,
            use_hearts: false,
            max_hearts: default_max_hearts(),
            key_constrained_mode: false,
            mode_key: default_mode_key(),
            mode_scale_name: default_mode_scale_name(),
        }
    }
}

impl GameSettings {
    /// Structural checks only. Constraint sets that leave no candidate are not
    /// rejected here; they surface as stalled spawns.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.game_modes.is_empty() {
            return Err(SettingsError::Invalid("no game mode enabled".to_string()));
        }
        if self.spawn_speed_ms == 0 {
            return Err(SettingsError::Invalid(
                "spawn_speed_ms must be positive".to_string(),
            ));
        }
        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::Invalid(
                "spawn_interval_ms must be positive".to_string(),
            ));
        }
        if self.use_hearts && self.max_hearts == 0 {
            return Err(SettingsError::Invalid(
                "max_hearts must be positive when hearts are used".to_string(),
            ));
        }
        Ok(())
    }
}

pub trait SettingsPort: Send + Sync {
    fn load_settings(&self) -> Result<GameSettings, SettingsError>;
}
