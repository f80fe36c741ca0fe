use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_LATERAL_RANGE, DEFAULT_LOOKAHEAD_SEC, DEFAULT_SENSITIVITY, DEFAULT_TARGET_SPACING,
    MAX_SENSITIVITY,
};
use crate::error::{EngineError, Result};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlData {
    pub sensitivity: Option<f32>,
    pub lateral_range: Option<f32>,
    pub target_spacing: Option<f32>,
    pub lookahead_sec: Option<f64>,
    pub rng_seed: Option<u64>,
}

const DEFAULT_RNG_SEED: u64 = 42;

/// Engine inputs fixed at construction time.
///
/// - `sensitivity` multiplies the per-tick jump progress step (live-mutable
///   through the engine)
/// - `lateral_range` is the half-width of the uniform lateral target offset
/// - `target_spacing` is the distance between consecutive targets along -Z
/// - `lookahead_sec` is how early a jump starts ahead of its beat
/// - `rng_seed` seeds the track generator
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub sensitivity: f32,
    pub lateral_range: f32,
    pub target_spacing: f32,
    pub lookahead_sec: f64,
    pub rng_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            lateral_range: DEFAULT_LATERAL_RANGE,
            target_spacing: DEFAULT_TARGET_SPACING,
            lookahead_sec: DEFAULT_LOOKAHEAD_SEC,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Omitted keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let data: TomlData = toml::from_str(text)?;
        let defaults = Self::default();
        let config = Self {
            sensitivity: data.sensitivity.unwrap_or(defaults.sensitivity),
            lateral_range: data.lateral_range.unwrap_or(defaults.lateral_range),
            target_spacing: data.target_spacing.unwrap_or(defaults.target_spacing),
            lookahead_sec: data.lookahead_sec.unwrap_or(defaults.lookahead_sec),
            rng_seed: data.rng_seed.unwrap_or(defaults.rng_seed),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sensitivity > 0.0 && self.sensitivity <= MAX_SENSITIVITY) {
            return Err(EngineError::InvalidConfig(format!(
                "sensitivity must be in (0, {MAX_SENSITIVITY}], got {}",
                self.sensitivity
            )));
        }
        if !(self.lateral_range >= 0.0 && self.lateral_range.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "lateral_range must be finite and non-negative, got {}",
                self.lateral_range
            )));
        }
        if !(self.target_spacing > 0.0 && self.target_spacing.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "target_spacing must be positive, got {}",
                self.target_spacing
            )));
        }
        if !(self.lookahead_sec > 0.0 && self.lookahead_sec.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "lookahead_sec must be positive, got {}",
                self.lookahead_sec
            )));
        }
        Ok(())
    }
}
