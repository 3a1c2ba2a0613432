//! Character vs hurdle collision detection
//!
//! Boxes are rebuilt from the current transforms every frame, so the check
//! must run after this frame's movement. A single hit ends the run, so the
//! scan stops at the first overlap.

use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::registry::Obstacle;
use super::state::Character;

/// Keeps the per-frame bounding boxes between frames
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionDetector {
    character_bounds: Aabb,
    obstacle_bounds: Vec<Aabb>,
    /// Index of the first hurdle the last check found touching the character
    hit: Option<usize>,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character box from the last check (EMPTY before the first one)
    pub fn character_bounds(&self) -> &Aabb {
        &self.character_bounds
    }

    /// Hurdle boxes from the last check, in spawn order
    pub fn obstacle_bounds(&self) -> &[Aabb] {
        &self.obstacle_bounds
    }

    /// Hurdle index (spawn order) hit by the last check
    pub fn hit(&self) -> Option<usize> {
        self.hit
    }

    /// Refresh every box and report whether the character touches any hurdle.
    ///
    /// No character (not loaded yet) means no collision.
    pub fn check(&mut self, character: Option<&Character>, obstacles: &[Obstacle], hurdle_local: &Aabb) -> bool {
        self.obstacle_bounds.clear();
        self.obstacle_bounds
            .extend(obstacles.iter().map(|o| o.world_bounds(hurdle_local)));

        let Some(character) = character else {
            self.character_bounds = Aabb::EMPTY;
            self.hit = None;
            return false;
        };
        self.character_bounds = character.world_bounds();

        self.hit = self
            .obstacle_bounds
            .iter()
            .position(|b| self.character_bounds.intersects(b));
        self.hit.is_some()
    }
}
