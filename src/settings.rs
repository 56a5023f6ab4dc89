//! Game settings and preferences
//!
//! Read once at startup from a JSON file. Anything missing from the file
//! takes its default; a missing file means all defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{TICK_RATE, WHITE};
use crate::persistence::file::DEFAULT_PATH;
use crate::sprite::Color;

/// Default settings file, relative to the working directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "CORONA_DASH_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame rate cap (ticks per second)
    pub fps: u32,
    /// Where the best score is kept
    pub high_score_path: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed; random per launch when unset
    pub seed: Option<u64>,
    /// Frame clear color
    pub background: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: TICK_RATE,
            high_score_path: PathBuf::from(DEFAULT_PATH),

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: None,
            background: WHITE,
        }
    }
}

impl Settings {
    /// Settings path: `$CORONA_DASH_SETTINGS`, else `settings.json`
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Strict load; `Ok(None)` when the file does not exist
    pub fn from_file(path: &Path) -> Result<Option<Self>, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(Some(settings.sanitized()))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::path();
        match Self::from_file(&path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Write the settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values into their usable ranges
    fn sanitized(mut self) -> Self {
        self.fps = self.fps.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}
