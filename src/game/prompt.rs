use crate::game::command::CommandKind;

/// Unique per spawn within one engine instance.
pub type PromptId = u64;

/// One in-flight falling prompt. Position is never stored; it is always
/// recomputed from elapsed time, so skipped or irregular ticks cannot make
/// it drift.
#[derive(Clone, Debug)]
pub struct Prompt {
    pub id: PromptId,
    pub kind: CommandKind,
    pub spawned_at_ms: f64,
    /// One-shot matched-or-retired flag. A prompt with this set must never
    /// be judged again.
    pub judged: bool,
}

impl Prompt {
    pub fn new(id: PromptId, kind: CommandKind, spawned_at_ms: f64) -> Self {
        Self {
            id,
            kind,
            spawned_at_ms,
            judged: false,
        }
    }

    /// Distance traveled since spawn at `speed` units per second. Negative
    /// elapsed time (clock regression) clamps to zero.
    pub fn traveled(&self, now_ms: f64, speed: f64) -> f64 {
        let elapsed_ms = (now_ms - self.spawned_at_ms).max(0.0);
        speed * elapsed_ms / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traveled_is_pure_in_elapsed_time() {
        let prompt = Prompt::new(1, CommandKind::Up, 1000.0);
        assert_eq!(prompt.traveled(1000.0, 150.0), 0.0);
        assert_eq!(prompt.traveled(1600.0, 150.0), 90.0);
        // A dropped frame changes nothing: same timestamp, same distance.
        assert_eq!(prompt.traveled(1600.0, 150.0), 90.0);
    }

    #[test]
    fn clock_regression_clamps_to_zero() {
        let prompt = Prompt::new(1, CommandKind::Down, 1000.0);
        assert_eq!(prompt.traveled(400.0, 150.0), 0.0);
    }
}
