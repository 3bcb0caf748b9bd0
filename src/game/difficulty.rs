/// Spawn-rate and travel-speed pair produced by the difficulty ladder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DifficultyParams {
    pub spawn_interval_ms: f64,
    pub speed: f64,
}

/// Score breakpoints, ordered ascending. Each row is strictly more
/// aggressive than the one before it; the configured base acts as the
/// floor below the first breakpoint.
const LADDER: [(u64, DifficultyParams); 4] = [
    (
        500,
        DifficultyParams {
            spawn_interval_ms: 1800.0,
            speed: 200.0,
        },
    ),
    (
        1000,
        DifficultyParams {
            spawn_interval_ms: 1700.0,
            speed: 250.0,
        },
    ),
    (
        3000,
        DifficultyParams {
            spawn_interval_ms: 1500.0,
            speed: 300.0,
        },
    ),
    (
        5000,
        DifficultyParams {
            spawn_interval_ms: 1200.0,
            speed: 350.0,
        },
    ),
];

/// Pure lookup: the same score always yields the same parameters. Rows are
/// clamped element-wise against `base` so a higher score never comes out
/// gentler than the configured starting point.
pub fn params_for(score: u64, base: DifficultyParams) -> DifficultyParams {
    let mut params = base;
    for &(breakpoint, row) in LADDER.iter() {
        if score <= breakpoint {
            break;
        }
        params = DifficultyParams {
            spawn_interval_ms: row.spawn_interval_ms.min(base.spawn_interval_ms),
            speed: row.speed.max(base.speed),
        };
    }
    params
}
