//! Game settings
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FPS, INITIAL_AMMO, OPEN_STEP, TIME_LIMIT};

/// Environment variable naming an alternate settings file
pub const SETTINGS_ENV: &str = "PACK_SHOOTER_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "pack_shooter.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shots available per run
    pub initial_ammo: u32,
    /// Shooting phase length in seconds
    pub time_limit: f32,
    /// Target frame rate
    pub fps: u32,
    /// Tear-open progress added per tick while a direction is held
    pub open_step: f32,
    /// Fixed RNG seed (random per launch when absent)
    pub seed: Option<u64>,

    // === Assets ===
    /// Directory scanned for `rare_card_*` images
    pub card_dir: PathBuf,
    /// Directory scanned for pack artwork
    pub pack_dir: PathBuf,
    /// Shared card back image
    pub card_back: PathBuf,

    /// Log output file (the terminal is owned by the game screen)
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_ammo: INITIAL_AMMO,
            time_limit: TIME_LIMIT,
            fps: FPS,
            open_step: OPEN_STEP,
            seed: None,

            card_dir: PathBuf::from("images"),
            pack_dir: PathBuf::from("pack_images"),
            card_back: PathBuf::from("images/card_ura.jpg"),

            log_file: PathBuf::from("pack_shooter.log"),
        }
    }
}

impl Settings {
    /// Path of the settings file, honoring the override variable
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Parse settings from a file
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or break a run
    pub fn sanitized(mut self) -> Self {
        self.initial_ammo = self.initial_ammo.max(1);
        if !(self.time_limit > 0.0) {
            self.time_limit = TIME_LIMIT;
        }
        self.fps = self.fps.clamp(1, 240);
        if !self.open_step.is_finite() {
            self.open_step = OPEN_STEP;
        }
        self.open_step = self.open_step.clamp(1.0, 100.0);
        self
    }

    /// Simulation timestep for the configured frame rate
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.initial_ammo, 10);
        assert_eq!(s.time_limit, 45.0);
        assert_eq!(s.fps, 60);
        assert!(s.seed.is_none());
    }

    #[test]
    fn test_partial_file_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_ammo": 3, "seed": 7 }}"#).unwrap();

        let s = Settings::load(file.path());
        assert_eq!(s.initial_ammo, 3);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.time_limit, 45.0);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(Settings::from_path(file.path()).is_err());
        assert_eq!(Settings::load(file.path()), Settings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load(&dir.path().join("absent.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_sanitized_clamps() {
        let s = Settings {
            initial_ammo: 0,
            time_limit: -1.0,
            fps: 0,
            open_step: 500.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(s.initial_ammo, 1);
        assert_eq!(s.time_limit, TIME_LIMIT);
        assert_eq!(s.fps, 1);
        assert_eq!(s.open_step, 100.0);
    }
}
