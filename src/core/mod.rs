pub mod config;
pub mod error;
pub mod types;

pub use config::{BotSettings, Difficulty, MatchConfig, OpponentRace, Rating};
pub use types::{Iteration, Point2, Race, Tag};
