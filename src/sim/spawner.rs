//! Hurdle spawning
//!
//! New hurdles go a random distance past the last one, on a random frame
//! cadence, so the player cannot settle into a fixed jump rhythm.

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::registry::{Obstacle, SpatialRegistry};

/// Position of the next hurdle: a gap in `[min_gap, 2 * min_gap)` past the last one
#[inline]
pub fn next_obstacle_x(last_x: f32, min_gap: f32, rng: &mut impl RandomSource) -> f32 {
    last_x + min_gap + rng.next_unit() * min_gap
}

/// Append a hurdle after the last one. An empty track starts measuring from x = 0.
pub fn spawn(registry: &mut SpatialRegistry, min_gap: f32, rng: &mut impl RandomSource) -> Obstacle {
    let last_x = registry.last_obstacle_x().unwrap_or(0.0);
    let x = next_obstacle_x(last_x, min_gap, rng);
    let obstacle = registry.push_obstacle(x);
    log::debug!("spawned hurdle {} at x={:.2} (gap {:.2})", obstacle.id, x, x - last_x);
    obstacle
}

/// Frame counter gating spawn attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCadence {
    /// Frames counted since the last spawn
    pub frames: u32,
}

impl SpawnCadence {
    /// Count one moving frame. Returns true when a hurdle is due, which also
    /// resets the counter.
    ///
    /// The threshold `interval + random * interval` is drawn fresh every frame
    /// and compared against the count before this frame is added.
    pub fn tick(&mut self, interval: u32, rng: &mut impl RandomSource) -> bool {
        let threshold = interval as f32 + rng.next_unit() * interval as f32;
        let due = self.frames as f32 > threshold;
        self.frames += 1;
        if due {
            self.frames = 0;
        }
        due
    }
}
