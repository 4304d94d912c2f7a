//! Match configuration loaded from TOML
//!
//! The configuration surface is forgiving by contract: only file-level
//! failures (unreadable file, malformed TOML document) are errors. Every
//! individual value that cannot be understood is replaced by its documented
//! default and reported with a warning, so a typo never aborts a match.

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Race;
use crate::personality::Personality;

/// Rating used when none is given or the given value is unparseable
pub const DEFAULT_RATING: u16 = 3000;
/// Highest accepted rating; larger values are clamped
pub const MAX_RATING: u16 = 9999;
/// Race used when the configured race string is not recognized
pub const DEFAULT_RACE: Race = Race::Zerg;
pub const DEFAULT_BOT_NAME: &str = "VersusAI";
/// Game loops per driver step
pub const DEFAULT_GAME_STEP: u32 = 2;

/// Errors that can occur when loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Skill rating in [0, 9999]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating(u16);

impl Rating {
    /// Clamp any integer into the accepted range
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, MAX_RATING as i64) as u16)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Interpret a loosely typed TOML value; `None` when it is not numeric
    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Integer(i) => Some(Self::new(*i)),
            toml::Value::Float(f) if f.is_finite() => Some(Self::new(*f as i64)),
            toml::Value::String(s) => s.trim().parse::<i64>().ok().map(Self::new),
            _ => None,
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

/// Built-in computer opponent race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpponentRace {
    Protoss,
    Terran,
    Zerg,
    #[default]
    Random,
}

impl OpponentRace {
    pub fn parse(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("random") {
            return Some(OpponentRace::Random);
        }
        Race::parse(name).map(|race| match race {
            Race::Protoss => OpponentRace::Protoss,
            Race::Terran => OpponentRace::Terran,
            Race::Zerg => OpponentRace::Zerg,
        })
    }
}

/// Built-in computer opponent difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    Medium,
    MediumHard,
    Hard,
    Harder,
    #[default]
    VeryHard,
    CheatVision,
    CheatMoney,
    CheatInsane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 10] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::MediumHard,
        Difficulty::Hard,
        Difficulty::Harder,
        Difficulty::VeryHard,
        Difficulty::CheatVision,
        Difficulty::CheatMoney,
        Difficulty::CheatInsane,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "VeryEasy",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::MediumHard => "MediumHard",
            Difficulty::Hard => "Hard",
            Difficulty::Harder => "Harder",
            Difficulty::VeryHard => "VeryHard",
            Difficulty::CheatVision => "CheatVision",
            Difficulty::CheatMoney => "CheatMoney",
            Difficulty::CheatInsane => "CheatInsane",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

/// The part of the configuration the race controllers consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotSettings {
    pub rating: Rating,
    pub personality: Personality,
}

impl BotSettings {
    pub fn new(rating: Rating, personality: Personality) -> Self {
        Self { rating, personality }
    }
}

/// Configuration exactly as written in the file, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchConfig {
    #[serde(default)]
    pub bot_name: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub rating: Option<toml::Value>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub opponent_race: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub map_pool: Vec<String>,
    #[serde(default)]
    pub realtime: bool,
    #[serde(default)]
    pub game_step: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RawMatchConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Validated match configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub bot_name: String,
    pub race: Race,
    pub settings: BotSettings,
    pub opponent_race: OpponentRace,
    pub difficulty: Difficulty,
    pub map: Option<String>,
    pub map_pool: Vec<String>,
    pub realtime: bool,
    /// Game loops the client advances between observations. Handed to the
    /// game client as-is; controllers only ever see the resulting ticks.
    pub game_step: u32,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::from_raw(RawMatchConfig {
            seed: Some(0),
            ..RawMatchConfig::default()
        })
    }
}

impl MatchConfig {
    /// Parse and normalize a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        RawMatchConfig::from_toml_str(contents).map(Self::from_raw)
    }

    /// Load and normalize `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        RawMatchConfig::load(path).map(Self::from_raw)
    }

    /// Replace every unrecognized value by its documented default
    pub fn from_raw(raw: RawMatchConfig) -> Self {
        let seed = raw.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let race = match raw.race.as_deref() {
            None => DEFAULT_RACE,
            Some(name) if name.trim().eq_ignore_ascii_case("random") => {
                *Race::ALL.choose(&mut rng).unwrap_or(&DEFAULT_RACE)
            }
            Some(name) => Race::parse(name).unwrap_or_else(|| {
                tracing::warn!("Invalid bot race: {}. Using {}.", name, DEFAULT_RACE);
                DEFAULT_RACE
            }),
        };

        let rating = match &raw.rating {
            None => Rating::default(),
            Some(value) => Rating::from_toml(value).unwrap_or_else(|| {
                tracing::warn!("Invalid rating: {}. Using {}.", value, DEFAULT_RATING);
                Rating::default()
            }),
        };

        let personality = match raw.personality.as_deref() {
            None => Personality::default(),
            Some(name) => Personality::parse(name).unwrap_or_else(|| {
                tracing::warn!("Invalid personality: {}. Using Standard.", name);
                Personality::Standard
            }),
        };

        let opponent_race = raw
            .opponent_race
            .as_deref()
            .map(|name| {
                OpponentRace::parse(name).unwrap_or_else(|| {
                    tracing::warn!("Invalid opponent race: {}. Using Random.", name);
                    OpponentRace::Random
                })
            })
            .unwrap_or_default();

        let difficulty = raw
            .difficulty
            .as_deref()
            .map(|name| {
                Difficulty::parse(name).unwrap_or_else(|| {
                    tracing::warn!("Invalid difficulty: {}. Using VeryHard.", name);
                    Difficulty::VeryHard
                })
            })
            .unwrap_or_default();

        let map = raw
            .map
            .filter(|m| !m.trim().is_empty())
            .or_else(|| raw.map_pool.choose(&mut rng).cloned());

        Self {
            bot_name: raw.bot_name.unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            race,
            settings: BotSettings::new(rating, personality),
            opponent_race,
            difficulty,
            map,
            map_pool: raw.map_pool,
            realtime: raw.realtime,
            game_step: raw.game_step.unwrap_or(DEFAULT_GAME_STEP).max(1),
            seed,
        }
    }

    /// Identifier used for the opponent in ladder bookkeeping
    pub fn opponent_id(&self) -> String {
        format!("{:?}_{}", self.opponent_race, self.difficulty.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamped() {
        assert_eq!(Rating::new(-5).value(), 0);
        assert_eq!(Rating::new(12000).value(), MAX_RATING);
        assert_eq!(Rating::new(4200).value(), 4200);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MatchConfig::from_toml_str("seed = 1").unwrap();
        assert_eq!(config.race, DEFAULT_RACE);
        assert_eq!(config.settings.rating.value(), DEFAULT_RATING);
        assert_eq!(config.settings.personality, Personality::Standard);
        assert_eq!(config.opponent_race, OpponentRace::Random);
        assert_eq!(config.difficulty, Difficulty::VeryHard);
        assert_eq!(config.game_step, DEFAULT_GAME_STEP);
        assert_eq!(config.map, None);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let doc = r#"
            race = "Elves"
            rating = "not a number"
            personality = "Sneaky"
            opponent_race = "Martian"
            difficulty = "Impossible"
            seed = 3
        "#;
        let config = MatchConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.race, Race::Zerg);
        assert_eq!(config.settings.rating.value(), DEFAULT_RATING);
        assert_eq!(config.settings.personality, Personality::Standard);
        assert_eq!(config.opponent_race, OpponentRace::Random);
        assert_eq!(config.difficulty, Difficulty::VeryHard);
    }

    #[test]
    fn test_rating_accepts_string_and_clamps() {
        let config = MatchConfig::from_toml_str("rating = \"7000\"\nseed = 1").unwrap();
        assert_eq!(config.settings.rating.value(), 7000);
        let config = MatchConfig::from_toml_str("rating = 20000\nseed = 1").unwrap();
        assert_eq!(config.settings.rating.value(), MAX_RATING);
    }

    #[test]
    fn test_random_race_is_seed_deterministic() {
        let a = MatchConfig::from_toml_str("race = \"Random\"\nseed = 99").unwrap();
        let b = MatchConfig::from_toml_str("race = \"random\"\nseed = 99").unwrap();
        assert_eq!(a.race, b.race);
    }

    #[test]
    fn test_map_chosen_from_pool() {
        let doc = "map_pool = [\"AbyssalReefLE\", \"BelShirVestigeLE\"]\nseed = 5";
        let config = MatchConfig::from_toml_str(doc).unwrap();
        let map = config.map.expect("pool entry chosen");
        assert!(config.map_pool.contains(&map));
    }

    #[test]
    fn test_explicit_map_wins_over_pool() {
        let doc = "map = \"AcropolisLE\"\nmap_pool = [\"AbyssalReefLE\"]\nseed = 5";
        let config = MatchConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.map.as_deref(), Some("AcropolisLE"));
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(matches!(
            MatchConfig::from_toml_str("race = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_game_step_minimum_one() {
        let config = MatchConfig::from_toml_str("game_step = 0\nseed = 1").unwrap();
        assert_eq!(config.game_step, 1);
    }

    #[test]
    fn test_opponent_id() {
        let doc = "opponent_race = \"terran\"\ndifficulty = \"harder\"\nseed = 1";
        let config = MatchConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.opponent_id(), "Terran_Harder");
    }
}
