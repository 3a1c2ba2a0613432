//! Spatial registry: where the track segments and hurdles currently are
//!
//! Plain data. The recycler moves segments, the spawner appends hurdles and
//! the collision detector reads hurdles; none of them own this storage.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{FACING_YAW, HURDLE_SCALE};
use crate::world_transform;

use super::bounds::Aabb;

/// One reusable piece of track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: u32,
    pub pos: Vec3,
}

/// A hurdle on the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
}

impl Obstacle {
    pub fn world_bounds(&self, local: &Aabb) -> Aabb {
        local.transformed(&world_transform(self.pos, FACING_YAW, HURDLE_SCALE))
    }
}

/// Current world positions of every segment and hurdle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpatialRegistry {
    /// Layout order, not spatial order once recycling starts
    pub segments: Vec<TrackSegment>,
    /// Spawn order, which is also increasing X order
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl SpatialRegistry {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_segment(&mut self, x: f32) -> TrackSegment {
        let segment = TrackSegment {
            id: self.next_entity_id(),
            pos: Vec3::new(x, 0.0, 0.0),
        };
        self.segments.push(segment);
        segment
    }

    pub fn push_obstacle(&mut self, x: f32) -> Obstacle {
        let obstacle = Obstacle {
            id: self.next_entity_id(),
            pos: Vec3::new(x, 0.0, 0.0),
        };
        self.obstacles.push(obstacle);
        obstacle
    }

    pub fn last_obstacle_x(&self) -> Option<f32> {
        self.obstacles.last().map(|o| o.pos.x)
    }

    /// Front-most segment position
    pub fn max_segment_x(&self) -> Option<f32> {
        self.segments.iter().map(|s| s.pos.x).reduce(f32::max)
    }

    /// First hurdle strictly ahead of `x`
    pub fn next_obstacle_after(&self, x: f32) -> Option<&Obstacle> {
        let idx = self.obstacles.partition_point(|o| o.pos.x <= x);
        self.obstacles.get(idx)
    }

    /// Number of hurdles behind `x`
    pub fn obstacles_behind(&self, x: f32) -> usize {
        self.obstacles.partition_point(|o| o.pos.x < x)
    }
}
