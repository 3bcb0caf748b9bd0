use crate::config::{BAD_WINDOW, GOOD_WINDOW, PERFECT_WINDOW};
use crate::error::{EngineError, Result};
use crate::game::command::CommandKind;
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JudgeTier {
    Perfect,
    Good,
    Bad,
    Miss,
}

/// Immutable judgment record, emitted once per resolved or swept prompt
/// (and once per input that found nothing to hit).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Judgment {
    pub kind: CommandKind,
    pub tier: JudgeTier,
}

pub fn base_points_for(tier: JudgeTier) -> u64 {
    match tier {
        JudgeTier::Perfect => 100,
        JudgeTier::Good => 50,
        JudgeTier::Bad => 10,
        JudgeTier::Miss => 0,
    }
}

/// Distance thresholds around the judgment line, in distance units.
/// Closer means better; beyond `bad` the input still consumes nothing
/// better than a miss.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TierWindows {
    pub perfect: f64,
    pub good: f64,
    pub bad: f64,
}

impl Default for TierWindows {
    fn default() -> Self {
        Self {
            perfect: PERFECT_WINDOW,
            good: GOOD_WINDOW,
            bad: BAD_WINDOW,
        }
    }
}

impl TierWindows {
    pub fn classify(&self, distance: f64) -> JudgeTier {
        if distance <= self.perfect {
            JudgeTier::Perfect
        } else if distance <= self.good {
            JudgeTier::Good
        } else if distance <= self.bad {
            JudgeTier::Bad
        } else {
            JudgeTier::Miss
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ordered = self.perfect > 0.0
            && self.perfect.is_finite()
            && self.perfect < self.good
            && self.good < self.bad
            && self.bad.is_finite();
        if ordered {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig(format!(
                "judgment windows must satisfy 0 < perfect < good < bad, got {} / {} / {}",
                self.perfect, self.good, self.bad
            )))
        }
    }
}
