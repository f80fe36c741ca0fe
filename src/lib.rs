use anyhow::{bail, Context};
use beatleap_core::{
    AnimationEngine, BeatSource, BeatTrack, EngineConfig, PlaybackClock, METRONOME_PERIOD_SEC,
    METRONOME_PHASE_SEC,
};

pub mod args;
pub mod constants;
pub mod events;
pub mod export;
pub mod frame;

use args::{BeatInput, CliArgs};
use export::FrameExporter;
use frame::{FrameContext, RunSummary};

/// Resolve the engine config: file (or defaults) with CLI overrides on top.
pub fn build_config(args: &CliArgs) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config_path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    if let Some(sensitivity) = args.sensitivity {
        config.sensitivity = sensitivity;
    }
    config.validate()?;
    Ok(config)
}

pub fn build_track(input: &BeatInput) -> anyhow::Result<BeatTrack> {
    let track = match input {
        BeatInput::File(path) => BeatTrack::load(path)?,
        BeatInput::Metronome { seconds } => {
            BeatTrack::metronome(METRONOME_PERIOD_SEC, METRONOME_PHASE_SEC, *seconds)?
        }
    };
    if track.duration_sec().is_none() {
        bail!("beat track has no beats and no duration");
    }
    Ok(track)
}

/// Build everything from the parsed arguments and drive the engine to the
/// end of the track.
pub fn run(args: CliArgs) -> anyhow::Result<RunSummary> {
    let config = build_config(&args)?;
    let track = build_track(&args.beats)?;
    let duration = track.duration_sec();
    log::info!("{} beats, duration {:.1}s", track.len(), duration.unwrap_or(0.0));

    let engine = AnimationEngine::new(config, track).context("starting animation engine")?;
    let clock = if args.realtime {
        PlaybackClock::wall_clock(duration)
    } else {
        PlaybackClock::manual(duration)
    };
    let mut ctx = FrameContext::new(engine, clock);
    if let Some(path) = &args.out {
        ctx.export = Some(FrameExporter::create(path)?);
    }

    let summary = if args.realtime {
        ctx.commands = Some(events::spawn_stdin_reader());
        frame::run_realtime(ctx)?
    } else {
        frame::run_offline(ctx)?
    };
    log::info!(
        "done: {} frames, {} ticks, {} jumps, {} landings, peak trail {}, peak ripples {}",
        summary.frames,
        summary.ticks,
        summary.jumps,
        summary.landings,
        summary.peak_trail,
        summary.peak_ripples
    );
    if summary.exported_frames > 0 {
        log::info!(
            "exported {} frames ({} instance bytes in the last frame)",
            summary.exported_frames,
            summary.last_instance_bytes
        );
    }
    Ok(summary)
}
