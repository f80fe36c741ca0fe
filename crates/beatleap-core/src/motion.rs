use std::f32::consts::PI;

use glam::Vec3;
use smallvec::SmallVec;

use crate::beat::{BeatEvent, BeatSource};
use crate::constants::*;
use crate::state::{squash_stretch_scale, BallState, MotionMode};
use crate::track::TrackGenerator;

/// Side effects requested by the state machine during one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum MotionEvent {
    JumpStarted {
        target_index: usize,
        beat_time_sec: f64,
        intensity: f32,
    },
    SpawnRipple {
        position: Vec3,
        intensity: f32,
    },
    FlashTarget {
        index: usize,
        amount: f32,
    },
    SpawnTrail {
        position: Vec3,
        vertical_scale: f32,
    },
}

pub type MotionEvents = SmallVec<[MotionEvent; 4]>;

/// Cubic ease-in-out over \[0, 1\].
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Vertical scale during the landing bounce: squashed while the timer is
/// above the threshold, unit afterwards.
#[inline]
pub fn landing_squash(landing_timer: f32, intensity: f32) -> f32 {
    if landing_timer > SQUASH_THRESHOLD {
        (1.0 - (landing_timer - SQUASH_THRESHOLD) * SQUASH_GAIN * intensity).max(MIN_SQUASH)
    } else {
        1.0
    }
}

/// Beat-driven jump/land/idle cycle of the ball.
///
/// Each call to `step` is one fixed tick. While grounded the machine watches
/// for a beat inside the lookahead window; a jump then runs for
/// `1 / (JUMP_BASE_STEP * sensitivity)` ticks toward the next target, lands
/// with a bounce, and returns to rest.
pub struct MotionStateMachine {
    ball: BallState,
    sensitivity: f32,
    lookahead_sec: f64,
    last_beat_sec: Option<f64>,
    last_now_sec: f64,
}

impl MotionStateMachine {
    pub fn new(sensitivity: f32, lookahead_sec: f64) -> Self {
        Self {
            ball: BallState::default(),
            sensitivity: sensitivity.clamp(f32::MIN_POSITIVE, MAX_SENSITIVITY),
            lookahead_sec,
            last_beat_sec: None,
            last_now_sec: 0.0,
        }
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity.clamp(f32::MIN_POSITIVE, MAX_SENSITIVITY);
    }

    pub fn progress_step(&self) -> f32 {
        JUMP_BASE_STEP * self.sensitivity
    }

    pub fn step<B: BeatSource + ?Sized>(
        &mut self,
        now_sec: f64,
        beats: &B,
        track: &mut TrackGenerator,
        out: &mut MotionEvents,
    ) {
        // Only a real seek moves the clock back by more than a tick; jitter
        // smaller than that must not make a used beat eligible again.
        if now_sec < self.last_now_sec - FIXED_STEP_SEC {
            self.last_beat_sec = None;
        }
        self.last_now_sec = now_sec;

        if self.ball.mode == MotionMode::Grounded {
            // A beat that already launched a jump never launches another.
            let after = match self.last_beat_sec {
                Some(last) if last > now_sec => last,
                _ => now_sec,
            };
            if let Some(beat) = beats.next_after(after) {
                if beat.timestamp_sec - now_sec <= self.lookahead_sec + LOOKAHEAD_EPSILON_SEC {
                    self.start_jump(beat, track, out);
                }
            }
        }

        match self.ball.mode {
            MotionMode::Jumping => self.integrate_jump(track, out),
            MotionMode::Landing => self.integrate_landing(),
            MotionMode::Grounded => {
                self.ball.position.y = REST_HEIGHT;
                self.ball.scale = Vec3::ONE;
            }
        }

        if self.ball.mode != MotionMode::Grounded {
            out.push(MotionEvent::SpawnTrail {
                position: self.ball.position,
                vertical_scale: self.ball.scale.y,
            });
        }
    }

    fn start_jump(&mut self, beat: BeatEvent, track: &mut TrackGenerator, out: &mut MotionEvents) {
        self.last_beat_sec = Some(beat.timestamp_sec);
        let ball = &mut self.ball;
        ball.mode = MotionMode::Jumping;
        ball.jump_progress = 0.0;
        ball.jump_origin = ball.position;
        ball.jump_intensity = beat.intensity.clamp(INTENSITY_MIN, INTENSITY_MAX);
        ball.current_target_index += 1;
        track.ensure_ahead(ball.current_target_index, MIN_TARGETS_AHEAD);
        log::debug!(
            "jump -> target {} for beat at {:.3}s (intensity {:.2})",
            ball.current_target_index,
            beat.timestamp_sec,
            ball.jump_intensity
        );
        out.push(MotionEvent::JumpStarted {
            target_index: ball.current_target_index,
            beat_time_sec: beat.timestamp_sec,
            intensity: ball.jump_intensity,
        });
    }

    fn destination(&self, track: &mut TrackGenerator) -> Vec3 {
        let index = self.ball.current_target_index;
        if let Some(t) = track.target(index) {
            return t.floor_position();
        }
        debug_assert!(false, "no target generated for index {index}");
        log::warn!("target {index} missing, extending track before use");
        track.ensure_ahead(index, MIN_TARGETS_AHEAD);
        track
            .target(index)
            .map(|t| t.floor_position())
            .unwrap_or(self.ball.jump_origin)
    }

    fn integrate_jump(&mut self, track: &mut TrackGenerator, out: &mut MotionEvents) {
        let dest = self.destination(track);
        let ball = &mut self.ball;
        let raw = ball.jump_progress + JUMP_BASE_STEP * self.sensitivity;
        let landed = raw >= 1.0;
        ball.jump_progress = raw.min(1.0);

        let p = ball.jump_progress;
        let ease = ease_in_out_cubic(p);
        let arc = (p * PI).sin().max(0.0);
        let apex = JUMP_BASE_HEIGHT + JUMP_INTENSITY_HEIGHT * ball.jump_intensity;
        ball.position = Vec3::new(
            ball.jump_origin.x + (dest.x - ball.jump_origin.x) * ease,
            REST_HEIGHT + arc * apex,
            ball.jump_origin.z + (dest.z - ball.jump_origin.z) * ease,
        );
        ball.scale = squash_stretch_scale(1.0 + arc * STRETCH_FACTOR * ball.jump_intensity);

        if landed {
            ball.mode = MotionMode::Landing;
            ball.landing_timer = 1.0;
            ball.position = Vec3::new(dest.x, REST_HEIGHT, dest.z);
            ball.scale = squash_stretch_scale(landing_squash(1.0, ball.jump_intensity));
            log::debug!("landed on target {}", ball.current_target_index);
            out.push(MotionEvent::SpawnRipple {
                position: ball.position,
                intensity: ball.jump_intensity,
            });
            out.push(MotionEvent::FlashTarget {
                index: ball.current_target_index,
                amount: TARGET_FLASH_SPIKE,
            });
        }
    }

    fn integrate_landing(&mut self) {
        let ball = &mut self.ball;
        ball.landing_timer -= LANDING_DECAY_PER_TICK;
        if ball.landing_timer <= 0.0 {
            ball.landing_timer = 0.0;
            ball.mode = MotionMode::Grounded;
            ball.position.y = REST_HEIGHT;
            ball.scale = Vec3::ONE;
            return;
        }
        let timer = ball.landing_timer;
        let bounce = (timer * PI * LANDING_BOUNCE_CYCLES).sin()
            * LANDING_BOUNCE_AMPLITUDE
            * timer
            * ball.jump_intensity;
        ball.position.y = REST_HEIGHT + bounce.max(0.0);
        ball.scale = squash_stretch_scale(landing_squash(timer, ball.jump_intensity));
    }
}
