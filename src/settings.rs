//! Player settings
//!
//! Read from a JSON file in the platform config directory. Every field has a
//! default, so a partial (or missing) file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player::PlayerConfig;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub timings: Timings,
    /// Volume applied before the first `change_volume`
    #[serde(default = "default_volume")]
    pub initial_volume: f32,
    /// Lyrics dataset to load instead of the bundled sample
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            initial_volume: default_volume(),
            dataset_path: None,
        }
    }
}

/// Timer durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    #[serde(default = "default_autoplay_delay_ms")]
    pub autoplay_delay_ms: u64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: default_autoplay_delay_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            scroll_debounce_ms: default_scroll_debounce_ms(),
        }
    }
}

fn default_volume() -> f32 {
    1.0
}

fn default_autoplay_delay_ms() -> u64 {
    100
}

fn default_toast_duration_ms() -> u64 {
    500
}

fn default_scroll_debounce_ms() -> u64 {
    15_000
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sundarkand", "SundarkandPlayer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| match Self::load_from_file(&path) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    if path.exists() {
                        tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                    }
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Timings and volume as a `PlayerConfig`
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            autoplay_delay: Duration::from_millis(self.timings.autoplay_delay_ms),
            toast_duration: Duration::from_millis(self.timings.toast_duration_ms),
            scroll_debounce: Duration::from_millis(self.timings.scroll_debounce_ms),
            initial_volume: self.initial_volume.clamp(0.0, 1.0),
        }
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}
