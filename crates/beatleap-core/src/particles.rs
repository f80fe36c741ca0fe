use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::constants::*;
use crate::state::squash_stretch_scale;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RippleKind {
    Glow,
    Ring,
}

/// Expanding impact disk on the floor plane. `position` is (x, z).
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub position: Vec2,
    pub life: f32,
    pub decay_rate: f32,
    pub max_radius: f32,
    pub intensity: f32,
    pub kind: RippleKind,
}

impl Ripple {
    /// Ease-out growth: fast at first, settling toward `max_radius + 1`.
    pub fn radius(&self) -> f32 {
        (1.0 - self.life * self.life) * self.max_radius + RIPPLE_BASE_RADIUS
    }

    pub fn opacity(&self) -> f32 {
        self.life * self.life
    }
}

/// Ghost of a past ball pose.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailSegment {
    pub position: Vec3,
    pub vertical_scale: f32,
    pub life: f32,
}

impl TrailSegment {
    pub fn scale(&self) -> Vec3 {
        squash_stretch_scale(self.vertical_scale)
    }

    /// Cubic falloff so the freshest segments dominate.
    pub fn opacity(&self) -> f32 {
        self.life * self.life * self.life
    }
}

/// Owner of every bounded-lifetime effect.
///
/// Trail retention uses the decay policy: every segment loses
/// `TRAIL_DECAY_PER_TICK` life per tick and is dropped at zero. All segments
/// decay at the same rate, so the oldest always sit at the front of the queue.
#[derive(Default)]
pub struct ParticleSystem {
    ripples: Vec<Ripple>,
    trail: VecDeque<TrailSegment>,
    ripples_spawned: u64,
    trail_spawned: u64,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the glow disk and ring for one landing.
    pub fn spawn_ripple_pair(&mut self, position: Vec3, intensity: f32) {
        let floor = Vec2::new(position.x, position.z);
        for (kind, decay_rate, radius) in [
            (RippleKind::Glow, GLOW_DECAY, GLOW_MAX_RADIUS),
            (RippleKind::Ring, RING_DECAY, RING_MAX_RADIUS),
        ] {
            self.ripples.push(Ripple {
                position: floor,
                life: 1.0,
                decay_rate,
                max_radius: radius * intensity,
                intensity,
                kind,
            });
        }
        self.ripples_spawned += 2;
    }

    pub fn spawn_trail(&mut self, position: Vec3, vertical_scale: f32) {
        self.trail.push_back(TrailSegment {
            position,
            vertical_scale,
            life: 1.0,
        });
        self.trail_spawned += 1;
    }

    /// Age everything by one tick and drop what has expired.
    pub fn advance(&mut self) {
        self.ripples.retain_mut(|r| {
            r.life -= r.decay_rate;
            r.life > 0.0
        });
        for seg in self.trail.iter_mut() {
            seg.life -= TRAIL_DECAY_PER_TICK;
        }
        while self.trail.front().is_some_and(|s| s.life <= 0.0) {
            self.trail.pop_front();
        }
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn trail(&self) -> impl Iterator<Item = &TrailSegment> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn ripples_spawned(&self) -> u64 {
        self.ripples_spawned
    }

    pub fn trail_spawned(&self) -> u64 {
        self.trail_spawned
    }
}
