//! Session settings
//!
//! Read from a JSON file. Missing fields fall back to their defaults, so a
//! settings file only needs the values it wants to change.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAP_HEIGHT, MAP_WIDTH, TILE_SIZE};

/// Largest accepted map edge, in tiles
pub const MAX_MAP_TILES: u32 = 1024;
/// Largest accepted tile edge, in pixels
pub const MAX_TILE_SIZE: u32 = 256;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Display name, used in the startup log
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Tile edge in pixels
    pub tile_size: u32,
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,

    pub quality: QualityPreset,
    /// Spawn/despawn bursts
    pub particles: bool,

    /// Length of a headless demo run, in seconds
    pub run_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            tile_size: TILE_SIZE,
            seed: None,
            quality: QualityPreset::Medium,
            particles: true,
            run_seconds: 120.0,
        }
    }
}

impl Settings {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject map shapes the simulation cannot run on
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value, max) in [
            ("map_width", self.map_width, MAX_MAP_TILES),
            ("map_height", self.map_height, MAX_MAP_TILES),
            ("tile_size", self.tile_size, MAX_TILE_SIZE),
        ] {
            if value == 0 || value > max {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be between 1 and {max}, got {value}"
                )));
            }
        }
        if !self.run_seconds.is_finite() || self.run_seconds < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "run_seconds must be a non-negative number, got {}",
                self.run_seconds
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }
}
