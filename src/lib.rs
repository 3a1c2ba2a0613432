//! Hurdle Run - an endless-runner hurdle game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (track recycling, obstacle spawning, actions, collisions)
//! - `platform`: Host collaborators (clock, scene, input, notifications) and a headless host
//! - `assets`: Geometry and animation clip descriptions handed over by the asset loader
//! - `settings`: Run configuration

pub mod assets;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Result, SetupError};
pub use settings::RunConfig;

use glam::{Affine3A, Quat, Vec3};

/// Fixed gameplay constants
pub mod consts {
    /// Nominal display refresh used by the headless host (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Default cross-fade between two actions (seconds)
    pub const DEFAULT_FADE: f32 = 0.5;
    /// Cross-fade when a finished jump hands back to running (seconds)
    pub const JUMP_RECOVER_FADE: f32 = 0.3;

    /// Segments further behind the camera than this many widths get recycled
    pub const RECYCLE_LOOK_BEHIND: f32 = 1.5;

    /// Every model is authored facing +Z; rotate a quarter turn to face the run direction
    pub const FACING_YAW: f32 = std::f32::consts::FRAC_PI_2;
    pub const CHARACTER_SCALE: f32 = 1.0;
    pub const HURDLE_SCALE: f32 = 0.7;
    pub const TRACK_SCALE: f32 = 1.0;

    /// Game over notice
    pub const GAME_OVER_TITLE: &str = "Game Over";
    pub const GAME_OVER_WIDTH: u32 = 300;
}

/// World transform for a model placed at `position`, turned by `yaw` about +Y
/// and uniformly scaled.
#[inline]
pub fn world_transform(position: Vec3, yaw: f32, scale: f32) -> Affine3A {
    Affine3A::from_scale_rotation_translation(Vec3::splat(scale), Quat::from_rotation_y(yaw), position)
}
