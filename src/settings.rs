//! Game settings and preferences
//!
//! Loaded from an optional JSON file. Missing fields fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::director::formation_extent;

/// Room the swarm gets to travel sideways and to drop before reaching the shields
const FORMATION_HEADROOM: f32 = 60.0;

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Playfield width (px)
    pub world_width: f32,
    /// Playfield height (px); the ground line sits 40px above the bottom
    pub world_height: f32,

    // === Simulation ===
    /// RNG seed for enemy fire selection
    pub seed: u64,
    /// Largest step a single frame may take (seconds)
    pub max_frame_dt: f32,

    // === Visual Effects ===
    /// Screen shake when the player is hit
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: 0x5eed,
            max_frame_dt: MAX_FRAME_DT,
            screen_shake: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !at_least(self.world_width, Self::min_world_width()) {
            return Err(SettingsError::Invalid {
                field: "world_width",
                reason: "too narrow for the widest formation",
            });
        }
        if !at_least(self.world_height, Self::min_world_height()) {
            return Err(SettingsError::Invalid {
                field: "world_height",
                reason: "too short for the deepest formation above the shields",
            });
        }
        if !(at_least(0.1, self.max_frame_dt) && self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "max_frame_dt",
                reason: "must be in (0, 0.1]",
            });
        }
        Ok(())
    }

    /// Narrowest world where the largest formation fits between the edge
    /// margins with room to move
    pub fn min_world_width() -> f32 {
        formation_extent(MAX_ROWS, MAX_COLS).x + 2.0 * (EDGE_MARGIN + FORMATION_HEADROOM)
    }

    /// Shortest world whose largest formation starts above the shield line
    pub fn min_world_height() -> f32 {
        GRID_TOP
            + formation_extent(MAX_ROWS, MAX_COLS).y
            + FORMATION_HEADROOM
            + SHIELD_RISE
            + GROUND_OFFSET
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }
}

/// `value >= min`; false when either side is NaN
fn at_least(value: f32, min: f32) -> bool {
    value >= min
}
