// Sanity checks on tuning constants that other modules rely on.

use beatleap_core::*;

#[test]
fn intensity_range_is_centered_on_neutral() {
    assert!(INTENSITY_MIN < INTENSITY_NEUTRAL && INTENSITY_NEUTRAL < INTENSITY_MAX);
    assert!(((INTENSITY_MIN + INTENSITY_MAX) / 2.0 - INTENSITY_NEUTRAL).abs() < 1e-6);
}

#[test]
fn default_jump_fits_inside_lookahead_and_beat_gap() {
    let ticks = (1.0 / (JUMP_BASE_STEP * DEFAULT_SENSITIVITY)).ceil() as f64;
    let landing_ticks = (1.0 / LANDING_DECAY_PER_TICK).ceil() as f64;
    // A full jump + landing cycle must finish before the next preview pulse.
    assert!((ticks + landing_ticks) * FIXED_STEP_SEC < METRONOME_PERIOD_SEC);
    assert!(DEFAULT_LOOKAHEAD_SEC > FIXED_STEP_SEC);
}

#[test]
fn preview_pulse_matches_sharpened_sine() {
    // sin(3.2 t) peaks first at t = pi / 6.4 and repeats every pi / 3.2.
    assert!(((3.2 * METRONOME_PHASE_SEC).sin() - 1.0).abs() < 1e-12);
    assert!((METRONOME_PERIOD_SEC - 2.0 * METRONOME_PHASE_SEC).abs() < 1e-12);
}

#[test]
fn track_keeps_enough_targets() {
    assert!(INITIAL_TARGETS > MIN_TARGETS_AHEAD);
    assert!(TARGET_BATCH > 0);
    assert!(TARGET_KEEP_BEHIND > 0);
}

#[test]
fn squash_never_inverts_the_ball() {
    assert!(MIN_SQUASH > 0.0);
    assert!(SQUASH_THRESHOLD > 0.0 && SQUASH_THRESHOLD < 1.0);
    let scale = squash_stretch_scale(MIN_SQUASH);
    assert!((scale.x * scale.y * scale.z - 1.0).abs() < 1e-5);
}

#[test]
fn camera_looks_ahead_of_the_ball() {
    assert!(CAMERA_OFFSET.z > 0.0 && CAMERA_OFFSET.y > CAMERA_LOOK_HEIGHT);
    assert!(CAMERA_FORWARD_SMOOTHING > CAMERA_LATERAL_SMOOTHING);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZFAR > CAMERA_ZNEAR);
}
