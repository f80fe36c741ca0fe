use std::time::Duration;

// Host loop tuning. Animation constants live in `beatleap_core::constants`.

// Wall-clock frame pacing in realtime mode (~60 Hz)
pub const REALTIME_FRAME_PERIOD: Duration = Duration::from_micros(16_667);
// Longest frame delta handed to the engine; longer stalls are treated as this
pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

// Transport
pub const SEEK_STEP_SEC: f64 = 5.0;

// Synthetic track length when running without a beat file
pub const DEFAULT_METRONOME_SECONDS: f64 = 30.0;

// Log a progress line every this many frames
pub const PROGRESS_LOG_FRAMES: u64 = 600;
