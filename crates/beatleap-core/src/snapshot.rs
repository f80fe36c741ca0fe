//! Read-only per-frame view handed to the renderer.
//!
//! Everything here is derived from engine state at the end of a tick; the
//! renderer never writes back. Radii and opacities are computed values, not
//! stored material state.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::particles::RippleKind;
use crate::state::{CameraState, MotionMode};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BallTransform {
    pub position: Vec3,
    pub scale: Vec3,
    pub mode: MotionMode,
}

/// `position` is (x, z) on the floor plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RippleView {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub kind: RippleKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrailView {
    pub position: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
}

/// `position` is (x, z) on the floor plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetView {
    pub index: usize,
    pub position: Vec2,
    pub flash_opacity: f32,
    pub emissive: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub time_sec: f64,
    /// Playback position as a fraction of the track, 0 when unknown.
    pub progress: f32,
    pub paused: bool,
    pub ball: BallTransform,
    pub camera: CameraState,
    pub ripples: Vec<RippleView>,
    pub trail: Vec<TrailView>,
    pub targets: Vec<TargetView>,
}

// Instance kinds understood by the renderer's shader.
pub const INSTANCE_BALL: u32 = 0;
pub const INSTANCE_TRAIL: u32 = 1;
pub const INSTANCE_GLOW: u32 = 2;
pub const INSTANCE_RING: u32 = 3;
pub const INSTANCE_TARGET: u32 = 4;

// Height offsets that keep floor effects from z-fighting.
const TARGET_Y: f32 = 0.01;
const GLOW_Y: f32 = 0.02;
const RING_Y: f32 = 0.04;

/// Flattened GPU instance record.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub opacity: f32,
    pub scale: [f32; 3],
    pub kind: u32,
}

impl FrameSnapshot {
    /// Flatten the snapshot into `out` (cleared first), back to front:
    /// targets, ripples, trail, then the ball.
    pub fn write_instances(&self, out: &mut Vec<InstanceData>) {
        out.clear();
        out.reserve(self.targets.len() + self.ripples.len() + self.trail.len() + 1);
        out.extend(self.targets.iter().map(|t| InstanceData {
            pos: [t.position.x, TARGET_Y, t.position.y],
            opacity: t.flash_opacity,
            scale: [1.0; 3],
            kind: INSTANCE_TARGET,
        }));
        out.extend(self.ripples.iter().map(|r| {
            let (y, kind) = match r.kind {
                RippleKind::Glow => (GLOW_Y, INSTANCE_GLOW),
                RippleKind::Ring => (RING_Y, INSTANCE_RING),
            };
            InstanceData {
                pos: [r.position.x, y, r.position.y],
                opacity: r.opacity,
                scale: [r.radius, 1.0, r.radius],
                kind,
            }
        }));
        out.extend(self.trail.iter().map(|s| InstanceData {
            pos: s.position.to_array(),
            opacity: s.opacity,
            scale: s.scale.to_array(),
            kind: INSTANCE_TRAIL,
        }));
        out.push(InstanceData {
            pos: self.ball.position.to_array(),
            opacity: 1.0,
            scale: self.ball.scale.to_array(),
            kind: INSTANCE_BALL,
        });
    }
}
