//! Run configuration
//!
//! Startup constants consumed by the simulation. Loaded once (optionally from a
//! JSON file) and never mutated while a run is in progress.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};

/// Upper bound on `move_speed`, in world units per frame
pub const MAX_MOVE_SPEED: f32 = 10.0;

/// Configuration for a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    // === Track ===
    /// Number of track segments laid out at start (the recycled pool)
    pub track_count: usize,
    /// Subtracted from the measured track width so neighbours overlap slightly
    pub track_overlap: f32,

    // === Hurdles ===
    /// Minimum gap between consecutive hurdles (actual gap is in [min, 2*min))
    pub hurdle_min_distance: f32,
    /// Base spawn interval in frames (actual threshold is in [interval, 2*interval))
    pub hurdle_interval: u32,
    /// X position of the first hurdle, placed before the loop starts
    pub first_hurdle_x: f32,

    // === Character ===
    /// Forward distance per frame while running or jumping
    pub move_speed: f32,
    /// Peak height of the jump arch
    pub jump_height: f32,

    // === Run ===
    /// Seed for the default random source
    pub seed: u64,
    /// Demo mode: the simulation presses its own keys
    pub autopilot: bool,
    /// Autopilot jumps once a hurdle is this close to the character's front face
    pub autopilot_lead: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            track_count: 6,
            track_overlap: 2.0,

            hurdle_min_distance: 5.0,
            hurdle_interval: 100,
            first_hurdle_x: 3.0,

            move_speed: 0.05,
            jump_height: 0.8,

            seed: 0x5EED,
            autopilot: false,
            autopilot_lead: 1.2,
        }
    }
}

impl RunConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded run config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.track_count == 0 {
            return Err(SetupError::InvalidConfig("track_count must be at least 1".into()));
        }
        if !self.hurdle_min_distance.is_finite() || self.hurdle_min_distance <= 0.0 {
            return Err(SetupError::InvalidConfig(format!(
                "hurdle_min_distance must be positive and finite, got {}",
                self.hurdle_min_distance
            )));
        }
        if !(0.0..=MAX_MOVE_SPEED).contains(&self.move_speed) {
            return Err(SetupError::InvalidConfig(format!(
                "move_speed must be in [0, {MAX_MOVE_SPEED}], got {}",
                self.move_speed
            )));
        }
        if !self.jump_height.is_finite() {
            return Err(SetupError::InvalidConfig("jump_height must be finite".into()));
        }
        Ok(())
    }
}
