use std::collections::VecDeque;

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{
    TARGET_BATCH, TARGET_FLASH_EMISSIVE_GAIN, TARGET_FLASH_OPACITY_GAIN, TARGET_IDLE_EMISSIVE,
    TARGET_IDLE_OPACITY,
};

/// A landing pad on the floor plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub index: usize,
    pub x: f32,
    pub z: f32,
    pub flash_intensity: f32,
}

impl Target {
    pub fn floor_position(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Disk opacity; idle pads stay faintly visible.
    pub fn flash_opacity(&self) -> f32 {
        (TARGET_IDLE_OPACITY + self.flash_intensity.max(0.0) * TARGET_FLASH_OPACITY_GAIN).min(1.0)
    }

    pub fn emissive(&self) -> f32 {
        TARGET_IDLE_EMISSIVE + self.flash_intensity.max(0.0) * TARGET_FLASH_EMISSIVE_GAIN
    }
}

/// Lazily extended sequence of targets marching along -Z.
///
/// Lateral offsets come from an explicitly seeded RNG so a given seed always
/// lays out the same track. Indices are stable even after old targets are
/// pruned from the front.
pub struct TrackGenerator {
    targets: VecDeque<Target>,
    spacing: f32,
    lateral_range: f32,
    rng: StdRng,
}

impl TrackGenerator {
    /// Create the launch pad at the origin followed by `initial - 1` targets.
    pub fn new(spacing: f32, lateral_range: f32, seed: u64, initial: usize) -> Self {
        let mut targets = VecDeque::with_capacity(initial.max(1));
        targets.push_back(Target {
            index: 0,
            x: 0.0,
            z: 0.0,
            flash_intensity: 0.0,
        });
        let mut track = Self {
            targets,
            spacing,
            lateral_range,
            rng: StdRng::seed_from_u64(seed),
        };
        track.generate(initial.saturating_sub(1));
        track
    }

    /// Append `count` targets after the highest existing index.
    pub fn generate(&mut self, count: usize) {
        // Never empty: pruning always keeps the targets ahead of the ball.
        let (mut index, mut z) = self
            .targets
            .back()
            .map(|t| (t.index, t.z))
            .unwrap_or((0, 0.0));
        for _ in 0..count {
            index += 1;
            z -= self.spacing;
            let x = if self.lateral_range > 0.0 {
                self.rng.gen_range(-self.lateral_range..=self.lateral_range)
            } else {
                0.0
            };
            self.targets.push_back(Target {
                index,
                x,
                z,
                flash_intensity: 0.0,
            });
        }
    }

    /// Generate whole batches until at least `min_ahead` targets lie beyond
    /// `current_index`. Returns the number of targets added.
    pub fn ensure_ahead(&mut self, current_index: usize, min_ahead: usize) -> usize {
        let mut added = 0;
        while self.highest_index().saturating_sub(current_index) < min_ahead {
            self.generate(TARGET_BATCH);
            added += TARGET_BATCH;
        }
        if added > 0 {
            log::info!(
                "track extended by {added} targets (highest index {})",
                self.highest_index()
            );
        }
        added
    }

    pub fn target(&self, index: usize) -> Option<&Target> {
        let base = self.targets.front()?.index;
        index
            .checked_sub(base)
            .and_then(|offset| self.targets.get(offset))
    }

    /// Spike a target's flash. Returns false when the index is not held.
    pub fn flash(&mut self, index: usize, amount: f32) -> bool {
        let Some(base) = self.targets.front().map(|t| t.index) else {
            return false;
        };
        match index
            .checked_sub(base)
            .and_then(|offset| self.targets.get_mut(offset))
        {
            Some(t) => {
                t.flash_intensity = amount;
                true
            }
            None => false,
        }
    }

    /// Subtractive flash decay, clamped at zero.
    pub fn decay_flashes(&mut self, rate: f32) {
        for t in self.targets.iter_mut().filter(|t| t.flash_intensity > 0.0) {
            t.flash_intensity = (t.flash_intensity - rate).max(0.0);
        }
    }

    /// Drop targets more than `keep` indices behind `current_index`.
    pub fn prune_behind(&mut self, current_index: usize, keep: usize) -> usize {
        let mut removed = 0;
        while let Some(front) = self.targets.front() {
            if front.index.saturating_add(keep) >= current_index {
                break;
            }
            self.targets.pop_front();
            removed += 1;
        }
        removed
    }

    pub fn highest_index(&self) -> usize {
        self.targets.back().map(|t| t.index).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }
}
