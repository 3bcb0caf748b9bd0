use crate::config::FIRST_SPAWN_DELAY_MS;
use crate::game::command::CommandKind;
use crate::game::prompt::{Prompt, PromptId};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Interval-gated prompt spawner. Kind selection is uniform over the
/// supported set; seeding the rng makes the spawn sequence reproducible.
pub struct Scheduler {
    spawn_interval_ms: f64,
    last_spawn_ms: f64,
    next_id: PromptId,
    rng: StdRng,
}

impl Scheduler {
    pub fn new(spawn_interval_ms: f64) -> Self {
        Self::from_rng(spawn_interval_ms, StdRng::from_os_rng())
    }

    pub fn with_seed(spawn_interval_ms: f64, seed: u64) -> Self {
        Self::from_rng(spawn_interval_ms, StdRng::seed_from_u64(seed))
    }

    fn from_rng(spawn_interval_ms: f64, rng: StdRng) -> Self {
        Self {
            spawn_interval_ms,
            last_spawn_ms: 0.0,
            next_id: 0,
            rng,
        }
    }

    /// Arms the spawn timer so the first prompt appears shortly after the
    /// session starts instead of a full interval later.
    pub fn prime(&mut self, now_ms: f64) {
        let first_delay = FIRST_SPAWN_DELAY_MS.min(self.spawn_interval_ms);
        self.last_spawn_ms = now_ms - self.spawn_interval_ms + first_delay;
    }

    /// Spawns a prompt if the interval has elapsed. Inserting it into the
    /// live set is the caller's job.
    pub fn try_spawn(&mut self, now_ms: f64) -> Option<Prompt> {
        if now_ms - self.last_spawn_ms < self.spawn_interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let kind = CommandKind::ALL[self.rng.random_range(0..CommandKind::ALL.len())];
        let id = self.next_id;
        self.next_id += 1;
        debug!("spawned prompt {} ({}) at {:.0}ms", id, kind, now_ms);
        Some(Prompt::new(id, kind, now_ms))
    }

    /// Applies to subsequent spawns only; an already-armed timer is not
    /// rescheduled retroactively.
    pub fn set_spawn_interval(&mut self, ms: f64) {
        self.spawn_interval_ms = ms;
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawn_interval_ms
    }
}
