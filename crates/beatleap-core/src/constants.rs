use glam::Vec3;

// Shared animation tuning constants. Values are per fixed tick unless the name
// says otherwise.

// Simulation clock
pub const FIXED_STEP_SEC: f64 = 1.0 / 60.0; // one animation tick
pub const MAX_STEPS_PER_ADVANCE: usize = 4; // catch-up cap after a frame hitch

// Beat triggering
pub const DEFAULT_LOOKAHEAD_SEC: f64 = 0.18; // jump starts this long before the beat
pub const LOOKAHEAD_EPSILON_SEC: f64 = 1e-9; // window start is inclusive despite rounding
pub const INTENSITY_MIN: f32 = 0.5; // normalized beat intensity range
pub const INTENSITY_MAX: f32 = 1.5;
pub const INTENSITY_NEUTRAL: f32 = 1.0; // used when a track has flat dynamics

// Jump
pub const JUMP_BASE_STEP: f32 = 0.045; // jump progress per tick at sensitivity 1
pub const DEFAULT_SENSITIVITY: f32 = 1.5;
pub const MAX_SENSITIVITY: f32 = 10.0; // 0.45 progress per tick, so a jump still spans 3 ticks
pub const REST_HEIGHT: f32 = 0.5; // ball centre when resting on the floor
pub const JUMP_BASE_HEIGHT: f32 = 6.0; // arc apex above rest height
pub const JUMP_INTENSITY_HEIGHT: f32 = 4.0; // extra apex per unit of intensity
pub const STRETCH_FACTOR: f32 = 0.4; // mid-air vertical stretch per unit of intensity

// Landing
pub const LANDING_DECAY_PER_TICK: f32 = 0.08;
pub const LANDING_BOUNCE_AMPLITUDE: f32 = 0.7;
pub const LANDING_BOUNCE_CYCLES: f32 = 3.0; // half-waves over the landing timer
pub const SQUASH_THRESHOLD: f32 = 0.7; // squash only while the timer is above this
pub const SQUASH_GAIN: f32 = 2.5;
pub const MIN_SQUASH: f32 = 0.2; // floor for the vertical squash scale

// Track layout
pub const DEFAULT_TARGET_SPACING: f32 = 12.0; // distance between targets along -Z
pub const DEFAULT_LATERAL_RANGE: f32 = 13.0; // half-width of the lateral offset range
pub const INITIAL_TARGETS: usize = 30;
pub const MIN_TARGETS_AHEAD: usize = 10;
pub const TARGET_BATCH: usize = 10;
pub const TARGET_KEEP_BEHIND: usize = 40; // targets kept behind the ball before pruning

// Target flash
pub const TARGET_FLASH_SPIKE: f32 = 1.5;
pub const TARGET_FLASH_DECAY: f32 = 0.045;
pub const TARGET_IDLE_OPACITY: f32 = 0.15;
pub const TARGET_FLASH_OPACITY_GAIN: f32 = 0.85;
pub const TARGET_IDLE_EMISSIVE: f32 = 0.5;
pub const TARGET_FLASH_EMISSIVE_GAIN: f32 = 8.0;

// Ripples: a wide soft glow disk and a thin bright ring per landing
pub const GLOW_DECAY: f32 = 0.02;
pub const GLOW_MAX_RADIUS: f32 = 8.0;
pub const RING_DECAY: f32 = 0.015;
pub const RING_MAX_RADIUS: f32 = 14.0;
pub const RIPPLE_BASE_RADIUS: f32 = 1.0; // radius at spawn

// Trail
pub const TRAIL_DECAY_PER_TICK: f32 = 0.035;

// Camera
pub const CAMERA_OFFSET: Vec3 = Vec3::new(18.0, 14.0, 26.0); // lateral, height, behind
pub const CAMERA_FORWARD_SMOOTHING: f32 = 0.05;
pub const CAMERA_LATERAL_SMOOTHING: f32 = 0.02;
pub const CAMERA_LOOK_HEIGHT: f32 = 3.5;
pub const CAMERA_LOOK_AHEAD: f32 = 8.0;
pub const CAMERA_FOVY_DEGREES: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Synthetic pulse used when no analysed track is available
pub const METRONOME_PERIOD_SEC: f64 = std::f64::consts::PI / 3.2;
pub const METRONOME_PHASE_SEC: f64 = std::f64::consts::PI / 6.4;

#[inline]
pub fn rest_position() -> Vec3 {
    Vec3::new(0.0, REST_HEIGHT, 0.0)
}
