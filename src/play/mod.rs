//! Headless play: full games between agents, and result tracking over a series.

pub mod episode;
pub mod metrics;

pub use episode::{episode_seed, play_game, play_match, GameRecord};
pub use metrics::{GameResult, MatchMetrics};
