use crate::game::judgment::{base_points_for, JudgeTier};
use log::debug;

pub const COMBO_STEP: u32 = 10;
pub const MULTIPLIER_PER_STEP: f64 = 0.1;
pub const MULTIPLIER_CAP: f64 = 2.0;

/// Combo multiplier as a step function of the current combo: +0.1 per ten
/// consecutive non-miss judgments, capped at 2.0.
pub fn multiplier_for(combo: u32) -> f64 {
    let bonus = (combo / COMBO_STEP) as f64 * MULTIPLIER_PER_STEP;
    1.0 + bonus.min(MULTIPLIER_CAP - 1.0)
}

/// Score, combo, and multiplier state. A pure reducer over judgment tiers:
/// the next state depends only on the prior state and the tier.
#[derive(Clone, Debug)]
pub struct ScoreState {
    score: u64,
    combo: u32,
    max_combo: u32,
    multiplier: f64,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            multiplier: 1.0,
        }
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one judgment tier and returns the score delta it earned.
    /// A miss resets combo and multiplier and earns nothing; anything else
    /// extends the combo before the multiplier is applied.
    pub fn apply(&mut self, tier: JudgeTier) -> u64 {
        if tier == JudgeTier::Miss {
            self.combo = 0;
            self.multiplier = 1.0;
            return 0;
        }

        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.multiplier = multiplier_for(self.combo);

        let delta = (base_points_for(tier) as f64 * self.multiplier).floor() as u64;
        self.score += delta;
        debug!(
            "{:?}: +{} (combo {}, x{:.1})",
            tier, delta, self.combo, self.multiplier
        );
        delta
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}
