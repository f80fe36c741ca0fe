use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{INTENSITY_MAX, INTENSITY_MIN, INTENSITY_NEUTRAL};
use crate::error::{EngineError, Result};

/// A timed jump trigger produced by audio analysis.
///
/// Fields:
/// - `timestamp_sec`: playback time of the beat in seconds
/// - `intensity`: normalized strength in \[0.5, 1.5\], scales jump height,
///   stretch and ripple size
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    pub timestamp_sec: f64,
    pub intensity: f32,
}

/// Supplier of beat events in playback-time order.
///
/// Implementations must tolerate being queried every tick and must only
/// return beats strictly after `after_sec`, sorted ascending.
pub trait BeatSource {
    fn peek_upcoming(&self, after_sec: f64) -> &[BeatEvent];

    fn next_after(&self, after_sec: f64) -> Option<BeatEvent> {
        self.peek_upcoming(after_sec).first().copied()
    }

    /// Track length, when known. Used for playback progress only.
    fn duration_sec(&self) -> Option<f64> {
        None
    }
}

/// Min-max normalize raw beat strengths into \[0.5, 1.5\].
///
/// A flat track (max == min) maps every beat to the neutral 1.0.
pub fn normalize_intensities(raw: &[f32]) -> Vec<f32> {
    let (min, max) = raw
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
        return vec![INTENSITY_NEUTRAL; raw.len()];
    }
    raw.iter()
        .map(|&v| INTENSITY_MIN + (v - min) / span * (INTENSITY_MAX - INTENSITY_MIN))
        .collect()
}

#[derive(Deserialize)]
struct BeatFile {
    beats: Vec<(f64, f32)>,
    #[serde(default)]
    duration: Option<f64>,
}

/// In-memory beat track sorted by timestamp.
#[derive(Clone, Debug, Default)]
pub struct BeatTrack {
    beats: Vec<BeatEvent>,
    duration_sec: Option<f64>,
}

impl BeatTrack {
    /// Build from `(timestamp, raw_strength)` pairs. Strengths are normalized
    /// here; input order does not matter.
    pub fn from_raw(raw: Vec<(f64, f32)>, duration_sec: Option<f64>) -> Self {
        let raw: Vec<(f64, f32)> = raw
            .into_iter()
            .filter(|(t, s)| t.is_finite() && s.is_finite())
            .collect();
        let strengths: Vec<f32> = raw.iter().map(|(_, s)| *s).collect();
        let intensities = normalize_intensities(&strengths);
        let mut beats: Vec<BeatEvent> = raw
            .iter()
            .zip(intensities)
            .map(|(&(timestamp_sec, _), intensity)| BeatEvent {
                timestamp_sec,
                intensity,
            })
            .collect();
        beats.sort_by(|a, b| a.timestamp_sec.total_cmp(&b.timestamp_sec));
        Self {
            beats,
            duration_sec,
        }
    }

    /// Parse `{ "beats": [[t, strength], ...], "duration": seconds }`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: BeatFile = serde_json::from_str(text)?;
        Ok(Self::from_raw(file.beats, file.duration))
    }

    /// Load a beat file, failing fast when it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let track = Self::from_json_str(&text)?;
        log::info!(
            "loaded {} beats from {} (duration {:?})",
            track.len(),
            path.display(),
            track.duration_sec
        );
        Ok(track)
    }

    /// Evenly spaced beats at neutral intensity: `phase + k * period` for
    /// every `k` that falls before `duration_sec`.
    pub fn metronome(period_sec: f64, phase_sec: f64, duration_sec: f64) -> Result<Self> {
        if !(period_sec > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "metronome period must be positive, got {period_sec}"
            )));
        }
        let mut beats = Vec::new();
        let mut t = phase_sec.max(0.0);
        while t < duration_sec {
            beats.push(BeatEvent {
                timestamp_sec: t,
                intensity: INTENSITY_NEUTRAL,
            });
            t += period_sec;
        }
        Ok(Self {
            beats,
            duration_sec: Some(duration_sec),
        })
    }

    pub fn beats(&self) -> &[BeatEvent] {
        &self.beats
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}

impl BeatSource for BeatTrack {
    fn peek_upcoming(&self, after_sec: f64) -> &[BeatEvent] {
        let start = self.beats.partition_point(|b| b.timestamp_sec <= after_sec);
        &self.beats[start..]
    }

    fn duration_sec(&self) -> Option<f64> {
        self.duration_sec
            .or_else(|| self.beats.last().map(|b| b.timestamp_sec))
    }
}
