use crate::error::{EngineError, Result};
use crate::game::judgment::TierWindows;
use serde::Deserialize;

// Gameplay Constants
pub const DEFAULT_SPAWN_INTERVAL_MS: f64 = 2000.0;
pub const DEFAULT_SPEED: f64 = 150.0; // Distance units per second
pub const DEFAULT_JUDGMENT_LINE_OFFSET: f64 = 100.0;
pub const DEFAULT_TRACK_LENGTH: f64 = 240.0;
pub const DEFAULT_LATE_MISS_THRESHOLD: f64 = 50.0;
pub const FIRST_SPAWN_DELAY_MS: f64 = 500.0;

// Judgment Windows (distance units from the judgment line)
pub const PERFECT_WINDOW: f64 = 15.0;
pub const GOOD_WINDOW: f64 = 40.0;
pub const BAD_WINDOW: f64 = 70.0;

/// Engine configuration. All values are in distance units and milliseconds;
/// the host decides what a distance unit maps to on screen.
///
/// `late_miss_threshold` (how far past the line an unmatched prompt is
/// retired as a miss) and `track_length` (where leftover prompts are
/// cleaned up) are intentionally separate knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EngineConfig {
    pub spawn_interval_ms: f64,
    pub speed: f64,
    pub judgment_line_offset: f64,
    pub track_length: f64,
    pub late_miss_threshold: f64,
    pub windows: TierWindows,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            speed: DEFAULT_SPEED,
            judgment_line_offset: DEFAULT_JUDGMENT_LINE_OFFSET,
            track_length: DEFAULT_TRACK_LENGTH,
            late_miss_threshold: DEFAULT_LATE_MISS_THRESHOLD,
            windows: TierWindows::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON. Unrecognized options are rejected,
    /// as are recognized options with out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "spawn_interval_ms must be positive, got {}",
                self.spawn_interval_ms
            )));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !self.track_length.is_finite() || self.track_length <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "track_length must be positive, got {}",
                self.track_length
            )));
        }
        if !self.judgment_line_offset.is_finite()
            || self.judgment_line_offset <= 0.0
            || self.judgment_line_offset >= self.track_length
        {
            return Err(EngineError::InvalidConfig(format!(
                "judgment_line_offset must lie inside the track (0, {}), got {}",
                self.track_length, self.judgment_line_offset
            )));
        }
        if !self.late_miss_threshold.is_finite() || self.late_miss_threshold <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "late_miss_threshold must be positive, got {}",
                self.late_miss_threshold
            )));
        }
        self.windows.validate()
    }
}
