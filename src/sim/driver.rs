//! Frame driver
//!
//! `Runner` binds a `RunState` to a host. `drive_frame` is the single entry
//! point a host's per-frame callback calls; `run` keeps calling it until the
//! death clip has played out (or the host stops producing frames).

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::random::{self, RandomSource};
use super::state::{RunEvent, RunState};
use super::tick::{Command, FrameInput, FrameOutcome, tick};
use crate::assets::RunAssets;
use crate::consts::{GAME_OVER_TITLE, GAME_OVER_WIDTH};
use crate::error::Result;
use crate::platform::{FrameHost, GameOverNotice, RenderKind, Renderable};
use crate::settings::RunConfig;

/// End-of-run statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u64,
    pub distance: f32,
    pub obstacles_spawned: usize,
    pub obstacles_cleared: usize,
    /// True when the run ended by collision rather than the host stopping
    pub died: bool,
}

pub struct Runner<H: FrameHost, R: RandomSource = Pcg32> {
    state: RunState<R>,
    host: H,
}

impl<H: FrameHost> Runner<H, Pcg32> {
    pub fn new(config: RunConfig, assets: &RunAssets, host: H) -> Result<Self> {
        let rng = random::seeded(config.seed);
        Self::with_rng(config, assets, host, rng)
    }
}

impl<H: FrameHost, R: RandomSource> Runner<H, R> {
    pub fn with_rng(config: RunConfig, assets: &RunAssets, host: H, rng: R) -> Result<Self> {
        config.validate()?;
        let state = RunState::with_rng(config, assets, rng);
        let mut runner = Self { state, host };
        runner.populate_scene();
        Ok(runner)
    }

    pub fn state(&self) -> &RunState<R> {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Hand the initial layout to the scene
    fn populate_scene(&mut self) {
        let state = &self.state;
        self.host.add_renderable(Renderable {
            kind: RenderKind::Character,
            id: 0,
            position: state.character.pos,
        });
        for obstacle in &state.registry.obstacles {
            self.host.add_renderable(Renderable {
                kind: RenderKind::Hurdle,
                id: obstacle.id,
                position: obstacle.pos,
            });
        }
        for segment in &state.registry.segments {
            self.host.add_renderable(Renderable {
                kind: RenderKind::TrackSegment,
                id: segment.id,
                position: segment.pos,
            });
        }
        self.host.set_camera_x(state.camera_x);
    }

    /// Process one host frame. Returns `Ended` once the run is over or the
    /// host has stopped scheduling frames.
    pub fn drive_frame(&mut self) -> FrameOutcome {
        if self.state.finished {
            return FrameOutcome::Ended;
        }
        let Some(dt) = self.host.next_frame() else {
            return FrameOutcome::Ended;
        };

        let mut input = FrameInput {
            autopilot: self.state.config.autopilot,
            ..Default::default()
        };
        for code in self.host.poll_keys() {
            match Command::from_key_code(&code) {
                Some(command) => input.commands.push(command),
                None => log::debug!("ignoring key {}", code),
            }
        }

        let outcome = tick(&mut self.state, &input, dt);
        self.sync_host();
        outcome
    }

    /// Mirror this frame's changes onto the host
    fn sync_host(&mut self) {
        self.host.move_renderable(0, self.state.character.pos);
        self.host.set_camera_x(self.state.camera_x);

        for event in self.state.drain_events() {
            match event {
                RunEvent::ObstacleSpawned(obstacle) => self.host.add_renderable(Renderable {
                    kind: RenderKind::Hurdle,
                    id: obstacle.id,
                    position: obstacle.pos,
                }),
                RunEvent::SegmentRecycled(segment) => {
                    self.host.move_renderable(segment.id, segment.pos)
                }
                RunEvent::ActionChanged { .. } | RunEvent::Collided { .. } => {}
                RunEvent::RunEnded => self.host.game_over(&GameOverNotice {
                    title: GAME_OVER_TITLE.to_string(),
                    width: GAME_OVER_WIDTH,
                }),
            }
        }
    }

    /// Drive frames until the run ends
    pub fn run(&mut self) -> RunSummary {
        while self.drive_frame() == FrameOutcome::Continue {}
        let summary = self.summary();
        log::info!(
            "Run summary: {} frames, distance {:.2}, {}/{} hurdles cleared, died={}",
            summary.frames,
            summary.distance,
            summary.obstacles_cleared,
            summary.obstacles_spawned,
            summary.died
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.state.frame,
            distance: self.state.distance(),
            obstacles_spawned: self.state.registry.obstacles.len(),
            obstacles_cleared: self.state.obstacles_cleared(),
            died: self.state.is_dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::demo_bundle;
    use crate::platform::HeadlessHost;
    use crate::sim::action::ActionKind;

    fn assets() -> RunAssets {
        RunAssets::from_bundle(&demo_bundle()).unwrap()
    }

    #[test]
    fn test_scene_populated_on_start() {
        let config = RunConfig::default();
        let runner = Runner::new(config.clone(), &assets(), HeadlessHost::default()).unwrap();
        let host = runner.host();
        let count = |kind| host.renderables.iter().filter(|r| r.kind == kind).count();
        assert_eq!(count(RenderKind::Character), 1);
        assert_eq!(count(RenderKind::Hurdle), 1);
        assert_eq!(count(RenderKind::TrackSegment), config.track_count);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RunConfig {
            hurdle_min_distance: -1.0,
            ..Default::default()
        };
        assert!(Runner::new(config, &assets(), HeadlessHost::default()).is_err());
    }

    #[test]
    fn test_key_press_reaches_state_machine() {
        let host = HeadlessHost::default().press_at(1, "ArrowRight").press_at(1, "F13");
        let config = RunConfig {
            first_hurdle_x: 1_000.0,
            ..Default::default()
        };
        let mut runner = Runner::new(config, &assets(), host).unwrap();
        assert_eq!(runner.drive_frame(), FrameOutcome::Continue);
        assert_eq!(runner.state().animator.current(), ActionKind::Running);
        assert_eq!(runner.host().camera_x, runner.state().character.pos.x);
    }

    #[test]
    fn test_host_stop_ends_loop() {
        let host = HeadlessHost::default().with_frame_limit(10);
        let config = RunConfig {
            first_hurdle_x: 1_000.0,
            ..Default::default()
        };
        let mut runner = Runner::new(config, &assets(), host).unwrap();
        let summary = runner.run();
        assert_eq!(summary.frames, 10);
        assert!(!summary.died);
        assert!(runner.host().notices.is_empty());
    }

    #[test]
    fn test_death_notifies_once() {
        let config = RunConfig {
            first_hurdle_x: 0.0,
            ..Default::default()
        };
        let mut runner = Runner::new(config, &assets(), HeadlessHost::default()).unwrap();
        let summary = runner.run();
        assert!(summary.died);
        assert_eq!(runner.drive_frame(), FrameOutcome::Ended);

        let notices = &runner.host().notices;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Game Over");
        assert_eq!(notices[0].width, 300);
    }
}
