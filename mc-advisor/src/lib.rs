//! mc-advisor: Monte-Carlo rollout advisor over the mc-core rules engine.

pub mod advisor;
pub mod rollout;

pub use advisor::{advise_move, Advice, AdviceStats, Advisor, AdvisorConfig, AdvisorError};
pub use rollout::WIN_SCORE;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
