//! In-memory host for the native binary and tests
//!
//! Fixed frame time, a scripted key queue and a flat record of everything
//! the simulation asked the scene and notifier to do.

use std::collections::VecDeque;

use glam::Vec3;

use super::{FrameClock, GameOverNotice, InputSource, Notifier, Renderable, Scene};
use crate::consts::FRAME_DT;

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    dt: f32,
    /// Frames left before the host stops scheduling (None = unlimited)
    frames_left: Option<u64>,
    /// Frames handed out so far
    frame: u64,
    /// (frame, key code) pairs, sorted by frame
    script: VecDeque<(u64, String)>,
    pending_keys: Vec<String>,

    pub camera_x: f32,
    pub renderables: Vec<Renderable>,
    pub notices: Vec<GameOverNotice>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(FRAME_DT)
    }
}

impl HeadlessHost {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            frames_left: None,
            frame: 0,
            script: VecDeque::new(),
            pending_keys: Vec::new(),
            camera_x: 0.0,
            renderables: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Stop scheduling after `frames` frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frames_left = Some(frames);
        self
    }

    /// Deliver `code` just before frame `frame` (1-based) is processed
    pub fn press_at(mut self, frame: u64, code: impl Into<String>) -> Self {
        let code = code.into();
        let idx = self.script.partition_point(|(f, _)| *f <= frame);
        self.script.insert(idx, (frame, code));
        self
    }

    /// Queue a key for the next poll
    pub fn press(&mut self, code: impl Into<String>) {
        self.pending_keys.push(code.into());
    }

    pub fn frames_elapsed(&self) -> u64 {
        self.frame
    }

    pub fn renderable(&self, id: u32) -> Option<&Renderable> {
        self.renderables.iter().find(|r| r.id == id)
    }
}

impl FrameClock for HeadlessHost {
    fn next_frame(&mut self) -> Option<f32> {
        if let Some(left) = self.frames_left.as_mut() {
            if *left == 0 {
                return None;
            }
            *left -= 1;
        }
        self.frame += 1;
        while self.script.front().is_some_and(|(f, _)| *f <= self.frame) {
            if let Some((_, code)) = self.script.pop_front() {
                self.pending_keys.push(code);
            }
        }
        Some(self.dt)
    }
}

impl Scene for HeadlessHost {
    fn set_camera_x(&mut self, x: f32) {
        self.camera_x = x;
    }

    fn add_renderable(&mut self, renderable: Renderable) {
        self.renderables.push(renderable);
    }

    fn move_renderable(&mut self, id: u32, position: Vec3) {
        if let Some(r) = self.renderables.iter_mut().find(|r| r.id == id) {
            r.position = position;
        }
    }
}

impl InputSource for HeadlessHost {
    fn poll_keys(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_keys)
    }
}

impl Notifier for HeadlessHost {
    fn game_over(&mut self, notice: &GameOverNotice) {
        log::info!("[{}] (width {})", notice.title, notice.width);
        self.notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RenderKind;

    #[test]
    fn test_frame_limit() {
        let mut host = HeadlessHost::default().with_frame_limit(2);
        assert_eq!(host.next_frame(), Some(FRAME_DT));
        assert_eq!(host.next_frame(), Some(FRAME_DT));
        assert_eq!(host.next_frame(), None);
        assert_eq!(host.frames_elapsed(), 2);
    }

    #[test]
    fn test_scripted_keys_arrive_on_their_frame() {
        let mut host = HeadlessHost::default()
            .press_at(3, "ArrowUp")
            .press_at(1, "ArrowRight");
        host.next_frame();
        assert_eq!(host.poll_keys(), vec!["ArrowRight".to_string()]);
        host.next_frame();
        assert!(host.poll_keys().is_empty());
        host.next_frame();
        assert_eq!(host.poll_keys(), vec!["ArrowUp".to_string()]);
    }

    #[test]
    fn test_move_renderable() {
        let mut host = HeadlessHost::default();
        host.add_renderable(Renderable {
            kind: RenderKind::TrackSegment,
            id: 4,
            position: Vec3::ZERO,
        });
        host.move_renderable(4, Vec3::X * 60.0);
        assert_eq!(host.renderable(4).map(|r| r.position.x), Some(60.0));
    }
}
