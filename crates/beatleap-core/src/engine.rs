use std::time::Duration;

use crate::beat::BeatSource;
use crate::camera::CameraController;
use crate::config::EngineConfig;
use crate::constants::*;
use crate::error::{EngineError, Result};
use crate::motion::{MotionEvent, MotionEvents, MotionStateMachine};
use crate::particles::ParticleSystem;
use crate::snapshot::{BallTransform, FrameSnapshot, RippleView, TargetView, TrailView};
use crate::state::BallState;
use crate::track::TrackGenerator;

/// Running counters, mostly for logging and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineStats {
    pub ticks: u64,
    pub jumps: u64,
    pub landings: u64,
    pub target_flashes: u64,
    /// Simulation time discarded after frame hitches.
    pub dropped_sec: f64,
}

/// Composes track, motion, particles and camera into one fixed-step loop.
///
/// Typical usage:
/// - Construct with `AnimationEngine::new(config, source)`
/// - Call `advance(dt, now_sec)` once per display frame with the playback
///   clock's current time
/// - Read `snapshot()` to draw the frame
///
/// The engine never schedules itself and never advances the playback clock.
pub struct AnimationEngine<S: BeatSource> {
    config: EngineConfig,
    source: S,
    track: TrackGenerator,
    motion: MotionStateMachine,
    particles: ParticleSystem,
    camera: CameraController,
    paused: bool,
    accumulator: f64,
    stats: EngineStats,
    events: MotionEvents,
    snapshot: FrameSnapshot,
}

impl<S: BeatSource> AnimationEngine<S> {
    /// Validate the config and build every component. Nothing is constructed
    /// when validation fails.
    pub fn new(config: EngineConfig, source: S) -> Result<Self> {
        config.validate()?;
        let track = TrackGenerator::new(
            config.target_spacing,
            config.lateral_range,
            config.rng_seed,
            INITIAL_TARGETS,
        );
        let motion = MotionStateMachine::new(config.sensitivity, config.lookahead_sec);
        let camera = CameraController::new(motion.ball().position);
        let snapshot = FrameSnapshot {
            tick: 0,
            time_sec: 0.0,
            progress: 0.0,
            paused: false,
            ball: BallTransform {
                position: motion.ball().position,
                scale: motion.ball().scale,
                mode: motion.ball().mode,
            },
            camera: camera.state().clone(),
            ripples: Vec::new(),
            trail: Vec::new(),
            targets: Vec::new(),
        };
        log::info!(
            "engine started: sensitivity {:.2}, spacing {:.1}, lateral ±{:.1}, seed {}",
            config.sensitivity,
            config.target_spacing,
            config.lateral_range,
            config.rng_seed
        );
        let mut engine = Self {
            config,
            source,
            track,
            motion,
            particles: ParticleSystem::new(),
            camera,
            paused: false,
            accumulator: 0.0,
            stats: EngineStats::default(),
            events: MotionEvents::new(),
            snapshot,
        };
        engine.refresh_snapshot(0.0);
        Ok(engine)
    }

    /// Advance by real frame time. Runs whole fixed ticks, at most
    /// `MAX_STEPS_PER_ADVANCE` per call; leftover time beyond that is dropped.
    /// Returns the number of ticks run (0 while paused).
    pub fn advance(&mut self, dt: Duration, now_sec: f64) -> usize {
        if self.paused {
            return 0;
        }
        self.accumulator += dt.as_secs_f64();
        let due = (self.accumulator / FIXED_STEP_SEC).floor() as usize;
        let steps = due.min(MAX_STEPS_PER_ADVANCE);
        self.accumulator -= steps as f64 * FIXED_STEP_SEC;
        if due > steps {
            log::warn!(
                "frame hitch: dropping {:.3}s of simulation",
                self.accumulator
            );
            self.stats.dropped_sec += self.accumulator;
            self.accumulator = 0.0;
        }
        // Spread sub-steps back in time so the last one lands on `now_sec`.
        for k in 0..steps {
            let behind = (steps - 1 - k) as f64 * FIXED_STEP_SEC;
            self.step(now_sec - behind);
        }
        steps
    }

    /// One fixed simulation tick at playback time `now_sec`. No-op while
    /// paused.
    pub fn step(&mut self, now_sec: f64) {
        if self.paused {
            return;
        }
        self.events.clear();
        self.motion
            .step(now_sec, &self.source, &mut self.track, &mut self.events);

        for event in self.events.iter() {
            match *event {
                MotionEvent::JumpStarted { .. } => self.stats.jumps += 1,
                MotionEvent::SpawnRipple {
                    position,
                    intensity,
                } => {
                    self.particles.spawn_ripple_pair(position, intensity);
                    self.stats.landings += 1;
                }
                MotionEvent::FlashTarget { index, amount } => {
                    if self.track.flash(index, amount) {
                        self.stats.target_flashes += 1;
                    }
                }
                MotionEvent::SpawnTrail {
                    position,
                    vertical_scale,
                } => self.particles.spawn_trail(position, vertical_scale),
            }
        }

        self.track.decay_flashes(TARGET_FLASH_DECAY);
        self.particles.advance();
        self.camera.update(self.motion.ball().position);

        let current = self.motion.ball().current_target_index;
        self.track.prune_behind(current, TARGET_KEEP_BEHIND);
        debug_assert!(self.track.highest_index() >= current + MIN_TARGETS_AHEAD);

        self.stats.ticks += 1;
        self.refresh_snapshot(now_sec);
    }

    fn refresh_snapshot(&mut self, now_sec: f64) {
        let progress = self.progress_at(now_sec);
        let ball = self.motion.ball();
        let snap = &mut self.snapshot;
        snap.tick = self.stats.ticks;
        snap.time_sec = now_sec;
        snap.progress = progress;
        snap.paused = self.paused;
        snap.ball = BallTransform {
            position: ball.position,
            scale: ball.scale,
            mode: ball.mode,
        };
        snap.camera = self.camera.state().clone();

        snap.ripples.clear();
        snap.ripples
            .extend(self.particles.ripples().iter().map(|r| RippleView {
                position: r.position,
                radius: r.radius(),
                opacity: r.opacity(),
                kind: r.kind,
            }));

        snap.trail.clear();
        snap.trail.extend(self.particles.trail().map(|s| TrailView {
            position: s.position,
            scale: s.scale(),
            opacity: s.opacity(),
        }));

        snap.targets.clear();
        snap.targets.extend(self.track.iter().map(|t| TargetView {
            index: t.index,
            position: glam::Vec2::new(t.x, t.z),
            flash_opacity: t.flash_opacity(),
            emissive: t.emissive(),
        }));
    }

    fn progress_at(&self, now_sec: f64) -> f32 {
        self.source
            .duration_sec()
            .filter(|d| *d > 0.0)
            .map(|d| (now_sec / d).clamp(0.0, 1.0) as f32)
            .unwrap_or(0.0)
    }

    /// Gate physics integration. The snapshot stays readable while paused.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("{}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
        self.snapshot.paused = paused;
        self.accumulator = 0.0;
    }

    /// Flip the pause gate, returning the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) -> Result<()> {
        if !(sensitivity > 0.0 && sensitivity <= MAX_SENSITIVITY) {
            return Err(EngineError::InvalidConfig(format!(
                "sensitivity must be in (0, {MAX_SENSITIVITY}], got {sensitivity}"
            )));
        }
        self.config.sensitivity = sensitivity;
        self.motion.set_sensitivity(sensitivity);
        Ok(())
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        &self.snapshot
    }

    /// Events produced by the most recent tick.
    pub fn last_events(&self) -> &[MotionEvent] {
        &self.events
    }

    pub fn ball(&self) -> &BallState {
        self.motion.ball()
    }

    pub fn track(&self) -> &TrackGenerator {
        &self.track
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }
}
