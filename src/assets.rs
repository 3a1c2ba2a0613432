//! Asset collaborator data
//!
//! The loader (glTF import, textures) lives outside this crate. Once loading
//! finishes it hands over an `AssetBundle`: three geometry parts in a fixed
//! order (character, hurdle, track) and the named animation clips.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};
use crate::sim::action::ActionKind;
use crate::sim::bounds::Aabb;

/// Local-space extents of a model, before placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub min: Vec3,
    pub max: Vec3,
}

impl Geometry {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A box of `size` standing on y = 0, centered on x and z
    pub fn grounded(size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: Vec3::new(-half.x, 0.0, -half.z),
            max: Vec3::new(half.x, size.y, half.z),
        }
    }

    #[inline]
    pub fn local_bounds(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }
}

/// A named animation clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub name: String,
    /// Clip length in seconds
    pub duration: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Raw loader output, consumed positionally
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetBundle {
    pub parts: Vec<Geometry>,
    pub clips: Vec<ClipInfo>,
}

/// Validated assets for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunAssets {
    pub character: Geometry,
    pub hurdle: Geometry,
    pub track: Geometry,
    /// Clip durations indexed by `ActionKind::index`
    pub clip_durations: [f32; ActionKind::COUNT],
}

impl RunAssets {
    pub fn from_bundle(bundle: &AssetBundle) -> Result<Self> {
        let [character, hurdle, track] = match bundle.parts.as_slice() {
            [c, h, t, ..] => [*c, *h, *t],
            parts => return Err(SetupError::MissingParts(parts.len())),
        };

        let mut clip_durations = [0.0; ActionKind::COUNT];
        for kind in ActionKind::ALL {
            let clip = bundle
                .clips
                .iter()
                .find(|c| c.name == kind.name())
                .ok_or(SetupError::MissingClip(kind.name()))?;
            if !(clip.duration.is_finite() && clip.duration > 0.0) {
                return Err(SetupError::InvalidClip {
                    name: clip.name.clone(),
                    duration: clip.duration,
                });
            }
            clip_durations[kind.index()] = clip.duration;
        }

        Ok(Self {
            character,
            hurdle,
            track,
            clip_durations,
        })
    }
}

/// Placeholder bundle for headless runs: a runner, a low hurdle and a wide track slab
pub fn demo_bundle() -> AssetBundle {
    AssetBundle {
        parts: vec![
            Geometry::grounded(Vec3::new(0.6, 1.8, 0.4)),
            Geometry::grounded(Vec3::new(1.2, 1.0, 0.2)),
            Geometry::new(Vec3::new(-1.5, -0.1, -6.0), Vec3::new(1.5, 0.0, 6.0)),
        ],
        clips: vec![
            ClipInfo::new("idle", 2.0),
            ClipInfo::new("running", 0.8),
            ClipInfo::new("jump", 1.0),
            ClipInfo::new("death", 1.5),
        ],
    }
}
