//! Character actions and the action state machine
//!
//! Four fixed actions (idle, running, jump, death) live in a fixed table
//! indexed by `ActionKind`. Exactly one is current; switching cross-fades the
//! outgoing action down while the incoming one fades up. Jump and death play
//! once and hold their final pose. Death is terminal.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FADE;

/// The fixed action set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Idle,
    Running,
    Jump,
    Death,
}

impl ActionKind {
    pub const COUNT: usize = 4;
    pub const ALL: [ActionKind; Self::COUNT] = [
        ActionKind::Idle,
        ActionKind::Running,
        ActionKind::Jump,
        ActionKind::Death,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            ActionKind::Idle => 0,
            ActionKind::Running => 1,
            ActionKind::Jump => 2,
            ActionKind::Death => 3,
        }
    }

    /// Clip name as exported by the asset pipeline
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Idle => "idle",
            ActionKind::Running => "running",
            ActionKind::Jump => "jump",
            ActionKind::Death => "death",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "idle" => Some(ActionKind::Idle),
            "running" => Some(ActionKind::Running),
            "jump" => Some(ActionKind::Jump),
            "death" => Some(ActionKind::Death),
            _ => None,
        }
    }

    /// Jump and death play through once and clamp at their last frame
    #[inline]
    pub fn plays_once(self) -> bool {
        matches!(self, ActionKind::Jump | ActionKind::Death)
    }

    /// Actions during which the character advances along the track
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, ActionKind::Running | ActionKind::Jump)
    }
}

/// How an action behaves when its clip time reaches the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    Repeat,
    Once,
}

/// Linear blend-weight ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback state of one animation clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Clip length in seconds
    pub duration: f32,
    /// Elapsed clip time in seconds
    pub time: f32,
    pub time_scale: f32,
    /// Base blend weight, multiplied by the fade level
    pub weight: f32,
    pub loop_mode: LoopMode,
    /// For `LoopMode::Once`: hold the last frame instead of disabling
    pub clamp_when_finished: bool,
    /// Scheduled with the mixer (`play` was called and not stopped)
    active: bool,
    enabled: bool,
    paused: bool,
    fade_level: f32,
    fade: Option<Fade>,
}

impl Action {
    pub fn new(kind: ActionKind, duration: f32) -> Self {
        Self {
            kind,
            duration,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            active: false,
            enabled: true,
            paused: false,
            fade_level: 1.0,
            fade: None,
        }
    }

    /// Rewind to the first frame and drop any pending fade
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.enabled = true;
        self.paused = false;
        self.fade = None;
        self.fade_level = 1.0;
    }

    pub fn play(&mut self) -> &mut Self {
        self.active = true;
        self
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.fade = None;
    }

    pub fn set_effective_time_scale(&mut self, scale: f32) -> &mut Self {
        self.time_scale = scale;
        self.paused = false;
        self
    }

    pub fn set_effective_weight(&mut self, weight: f32) -> &mut Self {
        self.weight = weight;
        self.enabled = true;
        self.fade = None;
        self.fade_level = 1.0;
        self
    }

    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(0.0, 1.0, duration);
        self
    }

    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        let from = self.fade_level;
        self.schedule_fade(from, 0.0, duration);
        self
    }

    fn schedule_fade(&mut self, from: f32, to: f32, duration: f32) {
        let fade = Fade {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        };
        self.fade_level = fade.value();
        self.fade = Some(fade);
        self.settle_fade();
    }

    /// Finish the fade if its ramp is complete; a finished fade-out disables the action
    fn settle_fade(&mut self) {
        if let Some(fade) = self.fade {
            if fade.is_done() {
                self.fade_level = fade.to;
                self.fade = None;
                if self.fade_level == 0.0 {
                    self.enabled = false;
                }
            }
        }
    }

    /// Current contribution to the blended pose
    pub fn effective_weight(&self) -> f32 {
        if self.active && self.enabled {
            self.weight * self.fade_level
        } else {
            0.0
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Playing and advancing: scheduled, enabled, not held on its last frame
    pub fn is_running(&self) -> bool {
        self.active && self.enabled && !self.paused && self.time_scale != 0.0
    }

    /// Clip time has reached the end of the clip
    pub fn is_at_end(&self) -> bool {
        self.time >= self.duration
    }

    /// Advance clip time and blend weight by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !self.active || !self.enabled {
            return;
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            self.fade_level = fade.value();
        }
        self.settle_fade();
        if !self.enabled {
            return;
        }

        if self.paused {
            return;
        }
        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Repeat => {
                if self.duration > 0.0 && (self.time >= self.duration || self.time < 0.0) {
                    self.time = self.time.rem_euclid(self.duration);
                }
            }
            LoopMode::Once => {
                if self.time >= self.duration || self.time < 0.0 {
                    self.time = self.time.clamp(0.0, self.duration);
                    if self.clamp_when_finished {
                        self.paused = true;
                    } else {
                        self.enabled = false;
                    }
                }
            }
        }
    }
}

/// Owns the action table and the current/previous pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    actions: [Action; ActionKind::COUNT],
    current: ActionKind,
    previous: Option<ActionKind>,
}

impl Animator {
    /// Build the table from clip durations (indexed by `ActionKind::index`) and start idling
    pub fn new(clip_durations: [f32; ActionKind::COUNT]) -> Self {
        let actions = ActionKind::ALL.map(|kind| Action::new(kind, clip_durations[kind.index()]));
        let mut animator = Self {
            actions,
            current: ActionKind::Idle,
            previous: None,
        };
        animator.action_mut(ActionKind::Idle).play();
        animator
    }

    #[inline]
    pub fn current(&self) -> ActionKind {
        self.current
    }

    #[inline]
    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    /// The action fading out after the last switch, if any
    #[inline]
    pub fn previous(&self) -> Option<ActionKind> {
        self.previous
    }

    #[inline]
    pub fn action(&self, kind: ActionKind) -> &Action {
        &self.actions[kind.index()]
    }

    #[inline]
    pub fn current_action(&self) -> &Action {
        self.action(self.current)
    }

    fn action_mut(&mut self, kind: ActionKind) -> &mut Action {
        &mut self.actions[kind.index()]
    }

    /// Advance the animation clock for every scheduled action
    pub fn update(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.advance(dt);
        }
    }

    /// Cross-fade to `target`. Returns whether a transition happened.
    ///
    /// Switching to the current action does nothing, and nothing leaves death.
    pub fn switch_action(&mut self, target: ActionKind, fade_duration: f32) -> bool {
        if target == self.current || self.current == ActionKind::Death {
            return false;
        }

        let outgoing = self.current;
        self.action_mut(outgoing).fade_out(fade_duration);
        self.previous = Some(outgoing);

        let incoming = self.action_mut(target);
        if target.plays_once() {
            incoming.loop_mode = LoopMode::Once;
            incoming.clamp_when_finished = true;
        }
        incoming.reset();
        incoming
            .set_effective_time_scale(1.0)
            .set_effective_weight(1.0)
            .fade_in(fade_duration)
            .play();
        self.current = target;

        log::debug!("action {} -> {} (fade {:.2}s)", outgoing.name(), target.name(), fade_duration);
        true
    }

    /// `switch_action` by clip name; unknown names are ignored
    pub fn switch_action_named(&mut self, name: &str, fade_duration: f32) -> bool {
        match ActionKind::from_name(name) {
            Some(kind) => self.switch_action(kind, fade_duration),
            None => {
                log::warn!("Ignoring switch to unknown action `{}`", name);
                false
            }
        }
    }

    /// `switch_action` with the default fade
    pub fn switch_to(&mut self, target: ActionKind) -> bool {
        self.switch_action(target, DEFAULT_FADE)
    }

    /// Jump clip has played to its end
    pub fn jump_finished(&self) -> bool {
        self.current == ActionKind::Jump && self.current_action().is_at_end()
    }

    /// Death clip is current and no longer playing
    pub fn death_finished(&self) -> bool {
        self.current == ActionKind::Death && !self.current_action().is_running()
    }

    /// Vertical offset of the character for the current pose
    pub fn vertical_offset(&self, jump_height: f32) -> f32 {
        if self.current == ActionKind::Jump {
            let jump = self.current_action();
            jump_offset(jump.time, jump.duration, jump_height)
        } else {
            0.0
        }
    }
}

/// Half-sine jump arch: zero at both ends of the clip, `height` at its midpoint
pub fn jump_offset(clip_time: f32, clip_duration: f32, height: f32) -> f32 {
    if clip_duration <= 0.0 || clip_time <= 0.0 || clip_time >= clip_duration {
        return 0.0;
    }
    let phase = clip_time / clip_duration;
    (phase * std::f32::consts::PI).sin() * height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::JUMP_RECOVER_FADE;

    const DT: f32 = 1.0 / 60.0;

    fn animator() -> Animator {
        Animator::new([2.0, 0.8, 1.0, 1.5])
    }

    #[test]
    fn test_starts_idle() {
        let anim = animator();
        assert_eq!(anim.current(), ActionKind::Idle);
        assert_eq!(anim.current_name(), "idle");
        assert!(anim.current_action().is_running());
        assert!(anim.previous().is_none());
    }

    #[test]
    fn test_names_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ActionKind::from_name("dance"), None);
    }

    #[test]
    fn test_switch_to_same_is_noop() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Running);
        anim.update(0.2);
        let before = anim.clone();
        assert!(!anim.switch_to(ActionKind::Running));
        assert_eq!(anim, before);
    }

    #[test]
    fn test_unknown_name_is_noop() {
        let mut anim = animator();
        let before = anim.clone();
        assert!(!anim.switch_action_named("moonwalk", DEFAULT_FADE));
        assert_eq!(anim, before);
        assert!(anim.switch_action_named("running", DEFAULT_FADE));
        assert_eq!(anim.current(), ActionKind::Running);
    }

    #[test]
    fn test_cross_fade_overlaps() {
        let mut anim = animator();
        anim.switch_action(ActionKind::Running, 0.5);
        assert_eq!(anim.previous(), Some(ActionKind::Idle));

        anim.update(0.25);
        let idle = anim.action(ActionKind::Idle).effective_weight();
        let running = anim.action(ActionKind::Running).effective_weight();
        assert!((idle - 0.5).abs() < 1e-4, "idle weight {idle}");
        assert!((running - 0.5).abs() < 1e-4, "running weight {running}");

        anim.update(0.3);
        assert_eq!(anim.action(ActionKind::Idle).effective_weight(), 0.0);
        assert!(!anim.action(ActionKind::Idle).is_running());
        assert_eq!(anim.action(ActionKind::Running).effective_weight(), 1.0);
        assert!(!anim.action(ActionKind::Running).is_fading());
    }

    #[test]
    fn test_jump_plays_once_and_clamps() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Jump);
        let jump = anim.action(ActionKind::Jump);
        assert_eq!(jump.loop_mode, LoopMode::Once);
        assert!(jump.clamp_when_finished);

        for _ in 0..120 {
            anim.update(DT);
        }
        let jump = anim.action(ActionKind::Jump);
        assert_eq!(jump.time, jump.duration);
        assert!(!jump.is_running());
        assert!(anim.jump_finished());
    }

    #[test]
    fn test_jump_finishes_after_duration() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Jump);
        anim.update(0.5);
        assert!(!anim.jump_finished());
        anim.update(0.6);
        assert!(anim.jump_finished());
        assert!(anim.switch_action(ActionKind::Running, JUMP_RECOVER_FADE));
        assert_eq!(anim.current(), ActionKind::Running);
    }

    #[test]
    fn test_running_loops() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Running);
        for _ in 0..200 {
            anim.update(DT);
        }
        let running = anim.action(ActionKind::Running);
        assert!(running.is_running());
        assert!(running.time < running.duration);
    }

    #[test]
    fn test_death_is_terminal() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Running);
        assert!(anim.switch_to(ActionKind::Death));
        for kind in ActionKind::ALL {
            assert!(!anim.switch_to(kind));
            assert_eq!(anim.current(), ActionKind::Death);
        }
    }

    #[test]
    fn test_death_finishes_after_clip() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Death);
        assert!(!anim.death_finished());
        anim.update(1.0);
        assert!(!anim.death_finished());
        anim.update(0.6);
        assert!(anim.death_finished());
        // Held on the final pose, not faded away
        assert_eq!(anim.current_action().effective_weight(), 1.0);
    }

    #[test]
    fn test_switch_back_into_fading_action() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Running);
        anim.update(0.1);
        anim.switch_to(ActionKind::Idle);
        let idle = anim.action(ActionKind::Idle);
        assert_eq!(idle.time, 0.0);
        assert!(idle.is_fading());
        anim.update(0.6);
        assert_eq!(anim.action(ActionKind::Idle).effective_weight(), 1.0);
        assert_eq!(anim.action(ActionKind::Running).effective_weight(), 0.0);
    }

    #[test]
    fn test_zero_fade_is_immediate() {
        let mut anim = animator();
        anim.switch_action(ActionKind::Running, 0.0);
        assert_eq!(anim.action(ActionKind::Running).effective_weight(), 1.0);
        assert_eq!(anim.action(ActionKind::Idle).effective_weight(), 0.0);
    }

    #[test]
    fn test_jump_offset_arch() {
        let h = 0.8;
        assert_eq!(jump_offset(0.0, 1.0, h), 0.0);
        assert_eq!(jump_offset(1.0, 1.0, h), 0.0);
        assert!((jump_offset(0.5, 1.0, h) - h).abs() < 1e-6);
        assert!(jump_offset(0.25, 1.0, h) > 0.0);
        assert!(jump_offset(0.25, 1.0, h) < h);

        // Arch follows the clip length
        assert!((jump_offset(0.75, 1.5, h) - h).abs() < 1e-6);
        assert_eq!(jump_offset(1.5, 1.5, h), 0.0);
    }

    #[test]
    fn test_vertical_offset_only_while_jumping() {
        let mut anim = animator();
        anim.switch_to(ActionKind::Running);
        anim.update(0.4);
        assert_eq!(anim.vertical_offset(0.8), 0.0);
        anim.switch_to(ActionKind::Jump);
        anim.update(0.5);
        assert!((anim.vertical_offset(0.8) - 0.8).abs() < 1e-5);
    }
}
