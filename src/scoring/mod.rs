pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{normalize, score, ScoreResult, Tier};
pub use validation::validate_scoring;
