//! Headless rhythm-timing engine. Prompts fall toward a judgment line, the
//! host submits decoded player commands, and the engine judges timing
//! accuracy, tracks combo/score, and ramps difficulty as the score grows.
//!
//! The engine renders nothing and owns no clock: the host drives it with
//! `tick(now_ms)` and `submit_input(kind, now_ms)` and reacts to the
//! returned [`EngineEvent`]s. Prompt positions are pure functions of
//! elapsed time, so any time source works, including a test harness.

pub mod config;
pub mod error;
pub mod game;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use game::command::CommandKind;
pub use game::difficulty::DifficultyParams;
pub use game::engine::{Engine, EngineEvent};
pub use game::judgment::{JudgeTier, Judgment, TierWindows};
pub use game::prompt::{Prompt, PromptId};
