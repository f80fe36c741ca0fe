// Integration tests for the composed fixed-step animation engine.

use std::time::Duration;

use beatleap_core::*;

const DT: f64 = FIXED_STEP_SEC;

fn metronome_engine(seconds: f64, seed: u64) -> AnimationEngine<BeatTrack> {
    let track = BeatTrack::metronome(METRONOME_PERIOD_SEC, METRONOME_PHASE_SEC, seconds).unwrap();
    let config = EngineConfig {
        rng_seed: seed,
        ..EngineConfig::default()
    };
    AnimationEngine::new(config, track).unwrap()
}

fn run_for(engine: &mut AnimationEngine<BeatTrack>, from_tick: u64, ticks: u64) {
    for k in from_tick..from_tick + ticks {
        engine.step(k as f64 * DT);
    }
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = EngineConfig {
        sensitivity: 0.0,
        ..EngineConfig::default()
    };
    let result = AnimationEngine::new(config, BeatTrack::default());
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}

#[test]
fn initial_snapshot_is_readable() {
    let engine = metronome_engine(5.0, 1);
    let snap = engine.snapshot();
    assert_eq!(snap.tick, 0);
    assert!(!snap.paused);
    assert_eq!(snap.ball.mode, MotionMode::Grounded);
    assert_eq!(snap.ball.position, rest_position());
    assert_eq!(snap.targets.len(), INITIAL_TARGETS);
    assert!(snap.ripples.is_empty());
    assert!(snap.trail.is_empty());
    assert_eq!(snap.camera.eye, CameraController::desired_eye(rest_position()));
}

#[test]
fn advance_runs_whole_fixed_steps() {
    let mut engine = metronome_engine(5.0, 1);
    assert_eq!(engine.advance(Duration::ZERO, 0.0), 0);
    assert_eq!(engine.advance(Duration::from_millis(10), 0.01), 0);
    assert_eq!(engine.advance(Duration::from_millis(10), 0.02), 1);
    assert_eq!(engine.advance(Duration::from_millis(50), 0.07), 3);
    assert_eq!(engine.stats().ticks, 4);
    assert_eq!(engine.snapshot().tick, 4);
    assert!((engine.snapshot().time_sec - 0.07).abs() < 1e-9);
}

#[test]
fn long_frames_are_capped_and_excess_dropped() {
    let mut engine = metronome_engine(5.0, 1);
    let steps = engine.advance(Duration::from_secs(1), 1.0);
    assert_eq!(steps, MAX_STEPS_PER_ADVANCE);
    let dropped = engine.stats().dropped_sec;
    let expected = 1.0 - MAX_STEPS_PER_ADVANCE as f64 * DT;
    assert!((dropped - expected).abs() < 1e-6, "dropped {dropped}");

    // Nothing carried over: the next short frame runs exactly one step.
    assert_eq!(engine.advance(Duration::from_millis(17), 1.017), 1);
}

#[test]
fn every_beat_lands_once_with_one_ripple_pair_and_flash() {
    let mut engine = metronome_engine(20.0, 5);
    let beats = engine.source().len() as u64;
    assert_eq!(beats, 20);

    let mut prev_mode = engine.ball().mode;
    for k in 0..(21.0 / DT) as u64 {
        engine.step(k as f64 * DT);
        let ripples_this_tick = engine
            .last_events()
            .iter()
            .filter(|e| matches!(e, MotionEvent::SpawnRipple { .. }))
            .count();
        let mode = engine.ball().mode;
        let landed = prev_mode == MotionMode::Jumping && mode == MotionMode::Landing;
        assert_eq!(ripples_this_tick, usize::from(landed));
        prev_mode = mode;
    }

    let stats = engine.stats();
    assert_eq!(stats.jumps, beats);
    assert_eq!(stats.landings, beats);
    assert_eq!(stats.target_flashes, beats);
    assert_eq!(engine.particles().ripples_spawned(), 2 * beats);
    assert_eq!(engine.ball().current_target_index as u64, beats);
}

#[test]
fn targets_stay_ahead_of_the_ball() {
    let mut engine = metronome_engine(60.0, 9);
    for k in 0..(60.0 / DT) as u64 {
        engine.step(k as f64 * DT);
        let current = engine.ball().current_target_index;
        assert!(engine.track().highest_index() >= current + MIN_TARGETS_AHEAD);
        assert!(engine.track().target(current).is_some());
    }
    // Old targets are pruned, so the snapshot stays bounded.
    let bound = TARGET_KEEP_BEHIND + MIN_TARGETS_AHEAD + TARGET_BATCH + 1;
    assert!(engine.snapshot().targets.len() <= bound);
}

#[test]
fn same_seed_same_frames() {
    let mut a = metronome_engine(8.0, 77);
    let mut b = metronome_engine(8.0, 77);
    for k in 0..(8.0 / DT) as u64 {
        let now = k as f64 * DT;
        a.step(now);
        b.step(now);
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at tick {k}");
    }
}

#[test]
fn different_seeds_lay_out_different_tracks() {
    let a = metronome_engine(8.0, 1);
    let b = metronome_engine(8.0, 2);
    let xs = |e: &AnimationEngine<BeatTrack>| {
        e.snapshot()
            .targets
            .iter()
            .map(|t| t.position.x)
            .collect::<Vec<_>>()
    };
    assert_ne!(xs(&a), xs(&b));
}

#[test]
fn pause_freezes_state_but_snapshot_stays_readable() {
    let mut engine = metronome_engine(10.0, 3);
    run_for(&mut engine, 0, 40);
    let before = engine.snapshot().clone();
    assert_ne!(before.ball.mode, MotionMode::Grounded);

    engine.set_paused(true);
    for _ in 0..30 {
        assert_eq!(engine.advance(Duration::from_millis(16), 1.0), 0);
    }
    let frozen = engine.snapshot();
    assert!(frozen.paused);
    assert_eq!(frozen.ball, before.ball);
    assert_eq!(frozen.trail, before.trail);
    assert_eq!(frozen.tick, before.tick);

    assert!(!engine.toggle_pause());
    assert!(!engine.snapshot().paused);
    engine.advance(Duration::from_millis(17), 40.0 * DT);
    assert_eq!(engine.stats().ticks, 41);
}

#[test]
fn step_is_ignored_while_paused() {
    let mut engine = metronome_engine(5.0, 3);
    run_for(&mut engine, 0, 10);
    let before = engine.snapshot().clone();
    let ticks = engine.stats().ticks;

    engine.set_paused(true);
    engine.step(1.0);
    engine.step(2.0);
    assert_eq!(engine.stats().ticks, ticks);
    let after = engine.snapshot();
    assert_eq!(after.ball, before.ball);
    assert_eq!(after.tick, before.tick);
    assert_eq!(after.time_sec, before.time_sec);
}

#[test]
fn landing_flash_shows_in_snapshot_then_fades() {
    let mut engine = metronome_engine(3.0, 4);
    let mut k = 0;
    while engine.stats().landings == 0 {
        engine.step(k as f64 * DT);
        k += 1;
    }
    let flashed = |e: &AnimationEngine<BeatTrack>| {
        e.snapshot()
            .targets
            .iter()
            .find(|t| t.index == 1)
            .map(|t| t.flash_opacity)
            .unwrap()
    };
    assert!(flashed(&engine) > 0.9);
    assert_eq!(engine.snapshot().ripples.len(), 2);

    run_for(&mut engine, k, 40);
    assert!((flashed(&engine) - TARGET_IDLE_OPACITY).abs() < 1e-6);
}

#[test]
fn camera_trails_the_ball() {
    let mut engine = metronome_engine(10.0, 6);
    run_for(&mut engine, 0, (10.0 / DT) as u64);
    let ball = engine.ball().position;
    let cam = &engine.snapshot().camera;
    let desired = CameraController::desired_eye(ball);

    assert!((cam.eye.y - CAMERA_OFFSET.y).abs() < 1e-6);
    assert!(cam.eye.z >= desired.z - 1e-3, "camera should lag behind");
    assert!(cam.eye.z - desired.z < DEFAULT_TARGET_SPACING * 2.0);
    assert!((cam.look_at - CameraController::look_at_for(ball)).length() < 1e-5);
}

#[test]
fn seeking_back_replays_beats() {
    let track = BeatTrack::from_raw(vec![(1.0, 1.0)], Some(3.0));
    let mut engine = AnimationEngine::new(EngineConfig::default(), track).unwrap();
    run_for(&mut engine, 0, 120);
    assert_eq!(engine.stats().jumps, 1);
    run_for(&mut engine, 0, 120);
    assert_eq!(engine.stats().jumps, 2);
    assert_eq!(engine.ball().current_target_index, 2);
}

#[test]
fn sensitivity_changes_live_and_rejects_bad_values() {
    let mut engine = metronome_engine(5.0, 1);
    engine.set_sensitivity(3.0).unwrap();
    assert!((engine.config().sensitivity - 3.0).abs() < 1e-6);
    assert!(matches!(
        engine.set_sensitivity(0.0),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!((engine.config().sensitivity - 3.0).abs() < 1e-6);
}

#[test]
fn progress_follows_playback_time() {
    let mut engine = metronome_engine(10.0, 1);
    engine.step(5.0);
    assert!((engine.snapshot().progress - 0.5).abs() < 1e-6);
    engine.step(12.0);
    assert!((engine.snapshot().progress - 1.0).abs() < 1e-6);
}

#[test]
fn instances_cover_every_drawable() {
    let mut engine = metronome_engine(5.0, 2);
    run_for(&mut engine, 0, 60);
    let snap = engine.snapshot();
    let mut instances = Vec::new();
    snap.write_instances(&mut instances);
    assert_eq!(
        instances.len(),
        snap.targets.len() + snap.ripples.len() + snap.trail.len() + 1
    );
    let ball = instances.last().unwrap();
    assert_eq!(ball.kind, INSTANCE_BALL);
    assert_eq!(ball.pos, snap.ball.position.to_array());
    assert_eq!(instances[0].kind, INSTANCE_TARGET);
    assert_eq!(std::mem::size_of::<InstanceData>(), 32);

    let bytes: &[u8] = bytemuck::cast_slice(&instances);
    assert_eq!(bytes.len(), instances.len() * 32);
}
