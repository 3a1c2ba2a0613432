//! Platform abstraction layer
//!
//! The simulation never talks to a window, renderer or UI toolkit directly.
//! A host implements these collaborator traits:
//! - `FrameClock`: per-frame callback timing
//! - `Scene`: camera position and renderable placement
//! - `InputSource`: key codes pressed since the previous frame
//! - `Notifier`: the end-of-run notice

pub mod headless;

pub use headless::HeadlessHost;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What a renderable stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderKind {
    Character,
    Hurdle,
    TrackSegment,
}

/// A renderable handed to the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub kind: RenderKind,
    pub id: u32,
    pub position: Vec3,
}

/// The terminal "game over" notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverNotice {
    pub title: String,
    pub width: u32,
}

pub trait FrameClock {
    /// Seconds since the previous frame, or `None` once the host stops
    /// scheduling frames (window closed, test script exhausted)
    fn next_frame(&mut self) -> Option<f32>;
}

pub trait Scene {
    fn set_camera_x(&mut self, x: f32);
    fn add_renderable(&mut self, renderable: Renderable);
    fn move_renderable(&mut self, id: u32, position: Vec3);
}

pub trait InputSource {
    /// `KeyboardEvent.code` values received since the last poll, oldest first
    fn poll_keys(&mut self) -> Vec<String>;
}

pub trait Notifier {
    /// Fire-and-forget
    fn game_over(&mut self, notice: &GameOverNotice);
}

/// Everything the frame driver needs from its host
pub trait FrameHost: FrameClock + Scene + InputSource + Notifier {}

impl<T: FrameClock + Scene + InputSource + Notifier> FrameHost for T {}
