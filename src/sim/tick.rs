//! One simulation frame
//!
//! Runs once per display refresh. The order of the steps matters: collision
//! is checked against this frame's final pose, and the death-finished check
//! comes after the death transition.

use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use super::random::RandomSource;
use super::spawner;
use super::state::{RunEvent, RunState};
use super::track;
use crate::consts::{DEFAULT_FADE, JUMP_RECOVER_FADE};

/// Player command decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Forward,
    Back,
    Jump,
}

impl Command {
    /// Map a `KeyboardEvent.code` to a command; everything else is ignored
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyD" | "ArrowRight" => Some(Command::Forward),
            "KeyA" | "ArrowLeft" => Some(Command::Back),
            "KeyW" | "ArrowUp" => Some(Command::Jump),
            _ => None,
        }
    }

    pub fn action(self) -> ActionKind {
        match self {
            Command::Forward => ActionKind::Running,
            Command::Back => ActionKind::Idle,
            Command::Jump => ActionKind::Jump,
        }
    }
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Commands received since the previous frame, in arrival order
    pub commands: Vec<Command>,
    /// Demo mode - the simulation presses its own keys
    pub autopilot: bool,
}

impl FrameInput {
    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Ended,
}

/// Advance the run by one frame of `dt` seconds
pub fn tick<R: RandomSource>(state: &mut RunState<R>, input: &FrameInput, dt: f32) -> FrameOutcome {
    if state.finished {
        return FrameOutcome::Ended;
    }
    state.frame += 1;

    // Input landed between frames; a dead runner ignores it
    if !state.is_dead {
        for command in &input.commands {
            state.switch_action(command.action(), DEFAULT_FADE);
        }
        if input.autopilot {
            if let Some(command) = autopilot_command(state) {
                state.switch_action(command.action(), DEFAULT_FADE);
            }
        }
    }

    // (1) Animation clock
    state.animator.update(dt);

    // (2) A finished jump lands back into running
    if state.animator.jump_finished() {
        state.switch_action(ActionKind::Running, JUMP_RECOVER_FADE);
    }

    // (3) Forward motion, camera follow, spawn cadence
    if state.animator.current().is_moving() {
        state.character.pos.x += state.config.move_speed;
        state.camera_x = state.character.pos.x;

        if state.cadence.tick(state.config.hurdle_interval, &mut state.rng) {
            let obstacle = spawner::spawn(
                &mut state.registry,
                state.config.hurdle_min_distance,
                &mut state.rng,
            );
            state.events.push(RunEvent::ObstacleSpawned(obstacle));
        }
    }

    // (4) Track recycling relative to the camera
    let moved = track::recycle(state.camera_x, &mut state.registry.segments, state.track_width);
    for id in moved {
        if let Some(segment) = state.registry.segments.iter().find(|s| s.id == id) {
            state.events.push(RunEvent::SegmentRecycled(*segment));
        }
    }

    // (5) Jump arch
    state.character.pos.y = state.animator.vertical_offset(state.config.jump_height);

    // (6) Collision against this frame's pose
    if state.detector.check(
        Some(&state.character),
        &state.registry.obstacles,
        &state.hurdle_bounds,
    ) {
        state.switch_action(ActionKind::Death, DEFAULT_FADE);
        if !state.is_dead {
            state.is_dead = true;
            state.character.alive = false;
            let obstacle_x = state
                .detector
                .hit()
                .and_then(|i| state.registry.obstacles.get(i))
                .map_or(state.character.pos.x, |o| o.pos.x);
            log::info!(
                "Hit the hurdle at x={:.2} (runner at x={:.2}) on frame {}",
                obstacle_x,
                state.character.pos.x,
                state.frame
            );
            state.events.push(RunEvent::Collided { obstacle_x });
        }
    }

    // (7) Halt once the death clip has played out
    if state.animator.death_finished() {
        state.finished = true;
        state.events.push(RunEvent::RunEnded);
        log::info!(
            "Run over after {} frames, distance {:.2}, {} hurdles cleared",
            state.frame,
            state.distance(),
            state.obstacles_cleared()
        );
        return FrameOutcome::Ended;
    }

    FrameOutcome::Continue
}

/// Demo-mode driver: start running, then jump when a hurdle gets close
fn autopilot_command<R>(state: &RunState<R>) -> Option<Command> {
    match state.animator.current() {
        ActionKind::Idle => Some(Command::Forward),
        ActionKind::Running => {
            let front = state.character.front_x();
            let next = state.registry.next_obstacle_after(state.character.pos.x)?;
            let hurdle_back = next.world_bounds(&state.hurdle_bounds).min.x;
            (hurdle_back - front <= state.config.autopilot_lead).then_some(Command::Jump)
        }
        ActionKind::Jump | ActionKind::Death => None,
    }
}
