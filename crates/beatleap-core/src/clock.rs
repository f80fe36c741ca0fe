use std::time::Duration;

use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClockMode {
    /// Time moves only through `advance`; used for offline baking and tests.
    Manual,
    /// Time follows the wall clock while playing.
    WallClock,
}

/// Playback position of the music, as seen by the host.
///
/// Non-decreasing while playing; only `seek` moves it backwards. Positions are
/// clamped to `[0, duration]` when the duration is known.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    mode: ClockMode,
    position_sec: f64,
    duration_sec: Option<f64>,
    playing: bool,
    anchor: Option<Instant>,
}

impl PlaybackClock {
    pub fn manual(duration_sec: Option<f64>) -> Self {
        Self {
            mode: ClockMode::Manual,
            position_sec: 0.0,
            duration_sec,
            playing: true,
            anchor: None,
        }
    }

    pub fn wall_clock(duration_sec: Option<f64>) -> Self {
        Self {
            mode: ClockMode::WallClock,
            position_sec: 0.0,
            duration_sec,
            playing: true,
            anchor: Some(Instant::now()),
        }
    }

    fn clamp(&self, sec: f64) -> f64 {
        let sec = sec.max(0.0);
        match self.duration_sec {
            Some(d) => sec.min(d),
            None => sec,
        }
    }

    pub fn now_sec(&self) -> f64 {
        match (self.mode, self.anchor) {
            (ClockMode::WallClock, Some(anchor)) if self.playing => {
                self.clamp(self.position_sec + anchor.elapsed().as_secs_f64())
            }
            _ => self.position_sec,
        }
    }

    /// Move manual time forward. No-op while paused or in wall-clock mode.
    pub fn advance(&mut self, dt: Duration) {
        if self.playing && self.mode == ClockMode::Manual {
            self.position_sec = self.clamp(self.position_sec + dt.as_secs_f64());
        }
    }

    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            if self.mode == ClockMode::WallClock {
                self.anchor = Some(Instant::now());
            }
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.position_sec = self.now_sec();
            self.playing = false;
            self.anchor = None;
        }
    }

    /// Flip play/pause, returning whether the clock is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    pub fn seek(&mut self, sec: f64) {
        self.position_sec = self.clamp(sec);
        if self.playing && self.mode == ClockMode::WallClock {
            self.anchor = Some(Instant::now());
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration_sec(&self) -> Option<f64> {
        self.duration_sec
    }

    pub fn progress(&self) -> f32 {
        match self.duration_sec {
            Some(d) if d > 0.0 => (self.now_sec() / d).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.duration_sec.is_some_and(|d| self.now_sec() >= d)
    }
}
