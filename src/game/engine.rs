use crate::config::EngineConfig;
use crate::error::Result;
use crate::game::command::CommandKind;
use crate::game::difficulty::{self, DifficultyParams};
use crate::game::judgment::{JudgeTier, Judgment};
use crate::game::prompt::{Prompt, PromptId};
use crate::game::scheduler::Scheduler;
use crate::game::score::ScoreState;
use log::{debug, info};

/// Notification emitted by a mutation entry point. The engine holds no
/// rendering or audio handles; shells react to these instead. Delivery is
/// fire-and-forget and at-most-once per prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    PromptSpawned {
        id: PromptId,
        kind: CommandKind,
        lane: usize,
    },
    PromptRemoved {
        id: PromptId,
    },
    Judged(Judgment),
    DifficultyChanged(DifficultyParams),
}

/// The timing, matching, and scoring core. Driven by exactly two mutation
/// sources: `tick` from the host's time source and `submit_input` from
/// decoded player input. Both take `&mut self`, so ticks and inputs are
/// atomic with respect to each other and the live set has a single writer.
pub struct Engine {
    config: EngineConfig,
    params: DifficultyParams,
    scheduler: Scheduler,
    live: Vec<Prompt>,
    score: ScoreState,
    running: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let params = base_params(&config);
        let scheduler = Scheduler::new(params.spawn_interval_ms);
        Ok(Self::assemble(config, params, scheduler))
    }

    /// Like [`Engine::new`] but with a fixed rng seed, so identical
    /// tick/input timestamp sequences produce identical event sequences.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let params = base_params(&config);
        let scheduler = Scheduler::with_seed(params.spawn_interval_ms, seed);
        Ok(Self::assemble(config, params, scheduler))
    }

    fn assemble(config: EngineConfig, params: DifficultyParams, scheduler: Scheduler) -> Self {
        Self {
            config,
            params,
            scheduler,
            live: Vec::new(),
            score: ScoreState::new(),
            running: false,
        }
    }

    /// Begins a fresh session at `now_ms`: score and difficulty reset,
    /// leftover prompts cleared (one removal event each), spawn timer armed.
    pub fn start(&mut self, now_ms: f64) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.clear_live(&mut events);
        self.score = ScoreState::new();
        self.params = base_params(&self.config);
        self.scheduler.set_spawn_interval(self.params.spawn_interval_ms);
        self.scheduler.prime(now_ms);
        self.running = true;
        info!("session started at {:.0}ms", now_ms);
        events
    }

    /// Halts spawning and sweeping and deterministically clears the live
    /// set. Effects already triggered by earlier judgments are the shell's
    /// business; nothing here reaches back to cancel them.
    pub fn stop(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.clear_live(&mut events);
        self.running = false;
        info!(
            "session stopped: score {}, max combo {}",
            self.score.score(),
            self.score.max_combo()
        );
        events
    }

    /// One pass of the update path: sweep overdue prompts, then consider a
    /// single spawn. A prompt spawned here is never swept in the same tick.
    pub fn tick(&mut self, now_ms: f64) -> Vec<EngineEvent> {
        if !self.running {
            return Vec::new();
        }
        let mut events = Vec::new();
        self.sweep(now_ms, &mut events);

        if let Some(prompt) = self.scheduler.try_spawn(now_ms) {
            events.push(EngineEvent::PromptSpawned {
                id: prompt.id,
                kind: prompt.kind,
                lane: prompt.kind.lane(),
            });
            self.live.push(prompt);
        }
        events
    }

    /// Resolves one player input against the live set: the prompt of the
    /// matching kind closest to the judgment line wins, ties going to the
    /// earliest-spawned. With no candidate the input itself is judged a
    /// miss and nothing is removed.
    pub fn submit_input(&mut self, kind: CommandKind, now_ms: f64) -> Vec<EngineEvent> {
        if !self.running {
            return Vec::new();
        }
        let mut events = Vec::new();

        let mut best: Option<(usize, f64)> = None;
        for (idx, prompt) in self.live.iter().enumerate() {
            if prompt.kind != kind || prompt.judged {
                continue;
            }
            let distance =
                (prompt.traveled(now_ms, self.params.speed) - self.config.judgment_line_offset).abs();
            // Strict comparison: the first (earliest-spawned) candidate
            // wins ties.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((idx, distance));
            }
        }

        let Some((idx, distance)) = best else {
            debug!("input {} with no live prompt of that kind", kind);
            self.score.apply(JudgeTier::Miss);
            events.push(EngineEvent::Judged(Judgment {
                kind,
                tier: JudgeTier::Miss,
            }));
            return events;
        };

        let tier = self.config.windows.classify(distance);
        self.live[idx].judged = true;
        let prompt = self.live.remove(idx);
        info!(
            "prompt {} ({}) judged {:?} at distance {:.1}",
            prompt.id, prompt.kind, tier, distance
        );
        events.push(EngineEvent::Judged(Judgment { kind, tier }));
        events.push(EngineEvent::PromptRemoved { id: prompt.id });

        self.score.apply(tier);
        if tier != JudgeTier::Miss {
            self.refresh_difficulty(&mut events);
        }
        events
    }

    /// Retires prompts that passed the judgment line by more than the late
    /// threshold (one miss each, enforced by the one-shot flag) and cleans
    /// up anything that left the track. Removal is deferred to the end of
    /// the pass so judgment order does not depend on track length.
    fn sweep(&mut self, now_ms: f64, events: &mut Vec<EngineEvent>) {
        let late_line = self.config.judgment_line_offset + self.config.late_miss_threshold;
        let mut removed: Vec<PromptId> = Vec::new();

        for prompt in self.live.iter_mut() {
            let traveled = prompt.traveled(now_ms, self.params.speed);
            if !prompt.judged && traveled > late_line {
                prompt.judged = true;
                info!(
                    "prompt {} ({}) passed the line unanswered",
                    prompt.id, prompt.kind
                );
                events.push(EngineEvent::Judged(Judgment {
                    kind: prompt.kind,
                    tier: JudgeTier::Miss,
                }));
                self.score.apply(JudgeTier::Miss);
                removed.push(prompt.id);
            } else if traveled > self.config.track_length {
                // Already-judged leftovers get cleaned up without a second
                // judgment.
                removed.push(prompt.id);
            }
        }

        for &id in &removed {
            events.push(EngineEvent::PromptRemoved { id });
        }
        self.live.retain(|p| !removed.contains(&p.id));
    }

    fn refresh_difficulty(&mut self, events: &mut Vec<EngineEvent>) {
        let next = difficulty::params_for(self.score.score(), base_params(&self.config));
        if next != self.params {
            info!(
                "difficulty up at score {}: interval {:.0}ms, speed {:.0}",
                self.score.score(),
                next.spawn_interval_ms,
                next.speed
            );
            self.params = next;
            self.scheduler.set_spawn_interval(next.spawn_interval_ms);
            events.push(EngineEvent::DifficultyChanged(next));
        }
    }

    fn clear_live(&mut self, events: &mut Vec<EngineEvent>) {
        for prompt in self.live.drain(..) {
            events.push(EngineEvent::PromptRemoved { id: prompt.id });
        }
    }

    /// Replaces the configuration wholesale. On a validation error the
    /// previous configuration stays in effect. New parameters are picked up
    /// by the next spawn and tick, never retroactively.
    pub fn configure(&mut self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.params = difficulty::params_for(self.score.score(), base_params(&self.config));
        self.scheduler.set_spawn_interval(self.params.spawn_interval_ms);
        Ok(())
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    pub fn max_combo(&self) -> u32 {
        self.score.max_combo()
    }

    pub fn combo_multiplier(&self) -> f64 {
        self.score.multiplier()
    }

    pub fn difficulty(&self) -> DifficultyParams {
        self.params
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn live_prompts(&self) -> &[Prompt] {
        &self.live
    }

    /// Current travel distance of a prompt under the active speed, for
    /// shells positioning their visuals.
    pub fn traveled(&self, prompt: &Prompt, now_ms: f64) -> f64 {
        prompt.traveled(now_ms, self.params.speed)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn base_params(config: &EngineConfig) -> DifficultyParams {
    DifficultyParams {
        spawn_interval_ms: config.spawn_interval_ms,
        speed: config.speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_engine(seed: u64) -> Engine {
        let mut engine = Engine::with_seed(EngineConfig::default(), seed).unwrap();
        engine.start(0.0);
        engine
    }

    fn spawn_one(engine: &mut Engine, now_ms: f64) -> Prompt {
        let events = engine.tick(now_ms);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, EngineEvent::PromptSpawned { .. })),
            "expected a spawn at {:.0}ms",
            now_ms
        );
        engine.live_prompts().last().unwrap().clone()
    }

    #[test]
    fn tick_and_input_are_ignored_before_start() {
        let mut engine = Engine::with_seed(EngineConfig::default(), 1).unwrap();
        assert!(engine.tick(100.0).is_empty());
        assert!(engine.submit_input(CommandKind::Up, 100.0).is_empty());
    }

    #[test]
    fn first_prompt_spawns_shortly_after_start() {
        let mut engine = started_engine(1);
        assert!(engine.tick(499.0).is_empty());
        let events = engine.tick(500.0);
        assert!(matches!(
            events[0],
            EngineEvent::PromptSpawned { id: 0, .. }
        ));
        assert_eq!(engine.live_prompts().len(), 1);
    }

    #[test]
    fn input_with_no_candidate_is_a_miss_and_removes_nothing() {
        let mut engine = started_engine(1);
        let prompt = spawn_one(&mut engine, 500.0);
        // Pick a kind with no live prompt.
        let other = CommandKind::ALL
            .into_iter()
            .find(|k| *k != prompt.kind)
            .unwrap();

        let events = engine.submit_input(other, 600.0);
        assert_eq!(
            events,
            vec![EngineEvent::Judged(Judgment {
                kind: other,
                tier: JudgeTier::Miss
            })]
        );
        assert_eq!(engine.live_prompts().len(), 1);
        assert_eq!(engine.combo(), 0);
    }

    #[test]
    fn matched_input_consumes_exactly_one_prompt() {
        let mut engine = started_engine(1);
        let prompt = spawn_one(&mut engine, 500.0);

        // 600ms after spawn at 150 u/s: traveled 90, distance 10, perfect.
        let events = engine.submit_input(prompt.kind, 1100.0);
        assert_eq!(
            events[0],
            EngineEvent::Judged(Judgment {
                kind: prompt.kind,
                tier: JudgeTier::Perfect
            })
        );
        assert_eq!(events[1], EngineEvent::PromptRemoved { id: prompt.id });
        assert!(engine.live_prompts().is_empty());
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.combo(), 1);
    }

    #[test]
    fn tie_break_prefers_earliest_spawned() {
        // Exact-arithmetic setup: speed 250 u/s reaches the line (100u) in
        // 400ms, and all timestamps are multiples of 50ms, so the two
        // candidate distances below compare exactly equal.
        let config = EngineConfig::from_json_str(
            r#"{ "spawn_interval_ms": 100.0, "speed": 250.0,
                 "track_length": 400.0, "late_miss_threshold": 200.0 }"#,
        )
        .unwrap();
        let mut engine = Engine::with_seed(config, 3).unwrap();
        engine.start(0.0);

        // Drive the seeded scheduler until some kind has spawned twice.
        let mut now = 0.0;
        let (first, second) = loop {
            now += 100.0;
            engine.tick(now);
            let live = engine.live_prompts();
            let pair = live.iter().find_map(|p| {
                live.iter()
                    .find(|q| q.kind == p.kind && q.id > p.id)
                    .map(|q| (p.clone(), q.clone()))
            });
            if let Some(pair) = pair {
                break pair;
            }
        };

        // Submitting at the symmetric instant puts the first prompt as far
        // past the line as the second is before it.
        let tie_at = (first.spawned_at_ms + second.spawned_at_ms) / 2.0 + 400.0;
        let events = engine.submit_input(first.kind, tie_at);
        assert!(events.contains(&EngineEvent::PromptRemoved { id: first.id }));
        assert!(engine.live_prompts().iter().any(|p| p.id == second.id));
    }

    #[test]
    fn sweep_retires_overdue_prompts_once() {
        let mut engine = started_engine(1);
        let prompt = spawn_one(&mut engine, 500.0);

        // traveled 151 > 100 + 50 at 1007ms after spawn.
        let events = engine.tick(500.0 + 1007.0);
        let misses: Vec<_> = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    EngineEvent::Judged(Judgment {
                        tier: JudgeTier::Miss,
                        ..
                    })
                )
            })
            .collect();
        assert_eq!(misses.len(), 1);
        assert!(events.contains(&EngineEvent::PromptRemoved { id: prompt.id }));
        assert!(engine.live_prompts().is_empty());

        // A later sweep finds nothing to judge again.
        let events = engine.tick(500.0 + 1100.0);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, EngineEvent::Judged(_))),
            "swept prompt must not be judged twice"
        );
    }

    #[test]
    fn sweep_miss_resets_combo() {
        let mut engine = started_engine(1);
        let prompt = spawn_one(&mut engine, 500.0);
        engine.submit_input(prompt.kind, 1100.0);
        assert_eq!(engine.combo(), 1);

        let prompt = spawn_one(&mut engine, 2500.0);
        engine.tick(prompt.spawned_at_ms + 1100.0);
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.max_combo(), 1);
    }

    #[test]
    fn stop_clears_the_live_set_deterministically() {
        let mut engine = started_engine(1);
        let prompt = spawn_one(&mut engine, 500.0);
        let events = engine.stop();
        assert_eq!(events, vec![EngineEvent::PromptRemoved { id: prompt.id }]);
        assert!(engine.live_prompts().is_empty());
        assert!(!engine.is_running());
        assert!(engine.tick(600.0).is_empty());
    }

    #[test]
    fn failed_configure_keeps_previous_configuration() {
        let mut engine = started_engine(1);
        let before = engine.config().clone();
        let mut bad = EngineConfig::default();
        bad.speed = 0.0;
        assert!(engine.configure(bad).is_err());
        assert_eq!(engine.config(), &before);
    }

    #[test]
    fn difficulty_event_fires_when_score_crosses_a_breakpoint() {
        let mut engine = started_engine(1);
        let mut now = 0.0;
        let mut saw_change = false;
        // Perfect-hit every prompt until the score passes 500.
        while engine.score() <= 500 {
            now += 100.0;
            for event in engine.tick(now) {
                if let EngineEvent::PromptSpawned { .. } = event {
                    let prompt = engine.live_prompts().last().unwrap().clone();
                    let hit_at = prompt.spawned_at_ms
                        + engine.config().judgment_line_offset / engine.difficulty().speed * 1000.0;
                    let events = engine.submit_input(prompt.kind, hit_at);
                    saw_change |= events
                        .iter()
                        .any(|e| matches!(e, EngineEvent::DifficultyChanged(_)));
                }
            }
        }
        assert!(saw_change);
        assert!(engine.difficulty().speed > EngineConfig::default().speed);
    }
}
