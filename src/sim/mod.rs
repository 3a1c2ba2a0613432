//! Per-frame simulation
//!
//! All gameplay logic lives here. Nothing in this module renders, loads files
//! or reads the wall clock:
//! - Frame time comes in as `dt`
//! - Randomness comes from an injected `RandomSource`
//! - Host-visible changes go out as `RunEvent`s

pub mod action;
pub mod bounds;
pub mod collision;
pub mod driver;
pub mod random;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod track;

pub use action::{Action, ActionKind, Animator, LoopMode, jump_offset};
pub use bounds::Aabb;
pub use collision::CollisionDetector;
pub use driver::{RunSummary, Runner};
pub use random::{FixedRandom, RandomSource, SequenceRandom};
pub use registry::{Obstacle, SpatialRegistry, TrackSegment};
pub use spawner::{SpawnCadence, next_obstacle_x, spawn};
pub use state::{Character, RunEvent, RunState};
pub use tick::{Command, FrameInput, FrameOutcome, tick};
pub use track::recycle;
