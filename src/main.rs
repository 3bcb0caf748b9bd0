use beatfall::{CommandKind, Engine, EngineConfig, EngineEvent, JudgeTier, PromptId};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::error::Error;

// A two-minute session, stepped at ~60fps of simulated time.
const SESSION_LENGTH_MS: f64 = 2.0 * 60.0 * 1000.0;
const TICK_STEP_MS: f64 = 16.0;

// Auto-player behavior
const REACTION_DISTANCE: f64 = 40.0;
const JITTER_MS: f64 = 120.0;
const FUMBLE_ONE_IN: u32 = 10;

/// Headless demo shell: drives the engine with a simulated clock and an
/// imperfect auto-player, then prints the session results. The real
/// rendering/audio shell consumes the same event stream.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    info!("Starting autoplay session...");
    let mut engine = Engine::with_seed(EngineConfig::default(), 0xBEA7)?;
    let mut rng = StdRng::seed_from_u64(0x5EED);
    engine.start(0.0);

    let mut attempted: HashSet<PromptId> = HashSet::new();
    let mut tier_counts: HashMap<JudgeTier, u32> = HashMap::new();

    let mut now = 0.0;
    while now < SESSION_LENGTH_MS {
        now += TICK_STEP_MS;
        let events = engine.tick(now);
        tally(&events, &mut tier_counts);

        // React once to each prompt as it nears the line, with jittered
        // timing and the occasional fumble.
        let due: Vec<(PromptId, CommandKind)> = engine
            .live_prompts()
            .iter()
            .filter(|p| !attempted.contains(&p.id))
            .filter(|p| {
                engine.traveled(p, now)
                    >= engine.config().judgment_line_offset - REACTION_DISTANCE
            })
            .map(|p| (p.id, p.kind))
            .collect();
        for (id, kind) in due {
            attempted.insert(id);
            if rng.random_range(0..FUMBLE_ONE_IN) == 0 {
                continue;
            }
            let press_at = now + rng.random_range(-JITTER_MS..JITTER_MS);
            let events = engine.submit_input(kind, press_at);
            tally(&events, &mut tier_counts);
        }
    }

    engine.stop();

    println!("final score: {}", engine.score());
    println!("max combo:   {}", engine.max_combo());
    for tier in [
        JudgeTier::Perfect,
        JudgeTier::Good,
        JudgeTier::Bad,
        JudgeTier::Miss,
    ] {
        println!(
            "{:<8} {}",
            format!("{:?}:", tier),
            tier_counts.get(&tier).copied().unwrap_or(0)
        );
    }
    Ok(())
}

fn tally(events: &[EngineEvent], tier_counts: &mut HashMap<JudgeTier, u32>) {
    for event in events {
        if let EngineEvent::Judged(judgment) = event {
            *tier_counts.entry(judgment.tier).or_insert(0) += 1;
        }
    }
}
