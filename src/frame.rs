use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use beatleap_core::{AnimationEngine, BeatSource, InstanceData, PlaybackClock, FIXED_STEP_SEC};
use crossbeam_channel::Receiver;
use instant::Instant;

use crate::constants::{MAX_FRAME_DT, PROGRESS_LOG_FRAMES, REALTIME_FRAME_PERIOD};
use crate::events::HostCommand;
use crate::export::FrameExporter;

/// Totals reported at the end of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub jumps: u64,
    pub landings: u64,
    pub peak_ripples: usize,
    pub peak_trail: usize,
    pub exported_frames: u64,
    pub last_instance_bytes: usize,
}

/// Everything one host frame touches: engine, clock, input and output.
pub struct FrameContext<S: BeatSource> {
    pub engine: AnimationEngine<S>,
    pub clock: PlaybackClock,
    pub commands: Option<Receiver<HostCommand>>,
    pub export: Option<FrameExporter<BufWriter<File>>>,
    pub instances: Vec<InstanceData>,
    pub summary: RunSummary,
    quit: bool,
}

impl<S: BeatSource> FrameContext<S> {
    pub fn new(engine: AnimationEngine<S>, clock: PlaybackClock) -> Self {
        Self {
            engine,
            clock,
            commands: None,
            export: None,
            instances: Vec::new(),
            summary: RunSummary::default(),
            quit: false,
        }
    }

    pub fn apply(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::TogglePause => {
                let playing = self.clock.toggle();
                self.engine.set_paused(!playing);
                log::info!("[keys] paused={}", !playing);
            }
            HostCommand::SeekBy(delta) => {
                let target = self.clock.now_sec() + delta;
                self.clock.seek(target);
                log::info!("[keys] seek to {:.2}s", self.clock.now_sec());
            }
            HostCommand::SeekTo(sec) => {
                self.clock.seek(sec);
                log::info!("[keys] seek to {:.2}s", self.clock.now_sec());
            }
            HostCommand::SetSensitivity(s) => match self.engine.set_sensitivity(s) {
                Ok(()) => log::info!("[keys] sensitivity={s:.2}"),
                Err(e) => log::warn!("[keys] {e}"),
            },
            HostCommand::Quit => self.quit = true,
        }
    }

    /// Run one host frame of length `dt`.
    pub fn frame(&mut self, dt: Duration) -> anyhow::Result<()> {
        let pending: Vec<HostCommand> = match &self.commands {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for cmd in pending {
            self.apply(cmd);
        }

        self.clock.advance(dt);
        let now = self.clock.now_sec();
        let steps = self.engine.advance(dt.min(MAX_FRAME_DT), now);

        let snapshot = self.engine.snapshot();
        if steps > 0 {
            if let Some(export) = &mut self.export {
                export.write(snapshot)?;
            }
        }
        snapshot.write_instances(&mut self.instances);

        let stats = self.engine.stats();
        let s = &mut self.summary;
        s.frames += 1;
        s.ticks = stats.ticks;
        s.jumps = stats.jumps;
        s.landings = stats.landings;
        s.peak_ripples = s.peak_ripples.max(snapshot.ripples.len());
        s.peak_trail = s.peak_trail.max(snapshot.trail.len());
        s.last_instance_bytes = bytemuck::cast_slice::<InstanceData, u8>(&self.instances).len();
        s.exported_frames = self.export.as_ref().map(|e| e.frames()).unwrap_or(0);

        if s.frames % PROGRESS_LOG_FRAMES == 0 {
            log::info!(
                "{:>5.1}% t={:.2}s jumps={} trail={} ripples={}",
                self.clock.progress() * 100.0,
                now,
                s.jumps,
                snapshot.trail.len(),
                snapshot.ripples.len()
            );
        }
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        self.quit || self.clock.is_finished()
    }

    /// Flush any export and return the totals.
    pub fn finish(mut self) -> anyhow::Result<RunSummary> {
        if let Some(export) = self.export.take() {
            self.summary.exported_frames = export.frames();
            export.finish()?;
        }
        Ok(self.summary)
    }
}

/// Simulate the whole track as fast as possible, one fixed tick per frame.
pub fn run_offline<S: BeatSource>(mut ctx: FrameContext<S>) -> anyhow::Result<RunSummary> {
    let dt = Duration::from_secs_f64(FIXED_STEP_SEC);
    while !ctx.is_done() {
        ctx.frame(dt)?;
    }
    ctx.finish()
}

/// Pace frames against the wall clock until the track ends or `q` arrives.
pub fn run_realtime<S: BeatSource>(mut ctx: FrameContext<S>) -> anyhow::Result<RunSummary> {
    let mut last_instant = Instant::now();
    while !ctx.is_done() {
        let frame_start = Instant::now();
        let dt = frame_start - last_instant;
        last_instant = frame_start;
        ctx.frame(dt)?;
        let spent = frame_start.elapsed();
        if let Some(rest) = REALTIME_FRAME_PERIOD.checked_sub(spent) {
            std::thread::sleep(rest);
        }
    }
    ctx.finish()
}
