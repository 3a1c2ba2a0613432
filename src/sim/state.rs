//! Run state and core simulation types
//!
//! Everything one run mutates lives in `RunState`, owned by the frame driver
//! and handed by reference to each component.

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, Animator};
use super::bounds::Aabb;
use super::collision::CollisionDetector;
use super::random::{self, RandomSource};
use super::registry::{Obstacle, SpatialRegistry, TrackSegment};
use super::spawner::SpawnCadence;
use crate::assets::RunAssets;
use crate::consts::{CHARACTER_SCALE, FACING_YAW, TRACK_SCALE};
use crate::settings::RunConfig;
use crate::world_transform;

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Only X (forward) and Y (jump) change during a run
    pub pos: Vec3,
    /// Fixed facing, a quarter turn toward +X
    pub yaw: f32,
    /// Model extents in local space
    pub local_bounds: Aabb,
    pub alive: bool,
}

impl Character {
    pub fn new(local_bounds: Aabb) -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: FACING_YAW,
            local_bounds,
            alive: true,
        }
    }

    /// Box around the character at its current pose
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds
            .transformed(&world_transform(self.pos, self.yaw, CHARACTER_SCALE))
    }

    /// X of the leading face
    pub fn front_x(&self) -> f32 {
        self.world_bounds().max.x
    }
}

/// Something the host should mirror (scene graph, HUD, notifications)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    ObstacleSpawned(Obstacle),
    SegmentRecycled(TrackSegment),
    ActionChanged { from: ActionKind, to: ActionKind },
    Collided { obstacle_x: f32 },
    RunEnded,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState<R = Pcg32> {
    pub config: RunConfig,
    /// Random source for spawn cadence and gaps
    pub rng: R,
    /// Frames processed so far
    pub frame: u64,
    pub character: Character,
    pub camera_x: f32,
    pub animator: Animator,
    pub registry: SpatialRegistry,
    /// Measured once from the track model, minus the overlap compensation
    pub track_width: f32,
    /// Local extents of the hurdle model
    pub hurdle_bounds: Aabb,
    pub detector: CollisionDetector,
    pub cadence: SpawnCadence,
    /// Set by the first collision; freezes input, movement and spawning
    pub is_dead: bool,
    /// Set once the death clip has finished; the loop halts
    pub finished: bool,
    /// Pending events for the host, drained by the frame driver
    pub events: Vec<RunEvent>,
}

impl RunState<Pcg32> {
    /// New run with the seeded default random source
    pub fn new(config: RunConfig, assets: &RunAssets) -> Self {
        let rng = random::seeded(config.seed);
        Self::with_rng(config, assets, rng)
    }
}

impl<R: RandomSource> RunState<R> {
    /// New run drawing from `rng`. Lays out the track and the first hurdle.
    pub fn with_rng(config: RunConfig, assets: &RunAssets, rng: R) -> Self {
        let track_local = assets.track.local_bounds();
        let track_size = track_local
            .transformed(&world_transform(Vec3::ZERO, FACING_YAW, TRACK_SCALE))
            .size();
        let track_width = track_size.x - config.track_overlap;

        let mut registry = SpatialRegistry::new();
        for i in 0..config.track_count {
            registry.push_segment(i as f32 * track_width);
        }
        registry.push_obstacle(config.first_hurdle_x);

        log::info!(
            "Run ready: seed={}, segments={}, track width={:.2}, first hurdle at x={:.2}",
            config.seed,
            config.track_count,
            track_width,
            config.first_hurdle_x
        );

        Self {
            animator: Animator::new(assets.clip_durations),
            character: Character::new(assets.character.local_bounds()),
            camera_x: 0.0,
            registry,
            track_width,
            hurdle_bounds: assets.hurdle.local_bounds(),
            detector: CollisionDetector::new(),
            cadence: SpawnCadence::default(),
            is_dead: false,
            finished: false,
            events: Vec::new(),
            frame: 0,
            rng,
            config,
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    /// Distance the character has run
    pub fn distance(&self) -> f32 {
        self.character.pos.x
    }

    /// Hurdles the character is already past
    pub fn obstacles_cleared(&self) -> usize {
        self.registry.obstacles_behind(self.character.pos.x)
    }

    /// Cross-fade to `target` and record the change
    pub fn switch_action(&mut self, target: ActionKind, fade: f32) -> bool {
        let from = self.animator.current();
        let switched = self.animator.switch_action(target, fade);
        if switched {
            self.events.push(RunEvent::ActionChanged { from, to: target });
        }
        switched
    }
}
