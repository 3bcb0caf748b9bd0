pub mod command;
pub mod difficulty;
pub mod engine;
pub mod judgment;
pub mod prompt;
pub mod scheduler;
pub mod score;
