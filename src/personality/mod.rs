//! Playstyle selection
//!
//! A personality is chosen once at configuration time and decides which
//! opener each race controller runs.

pub mod opener;

pub use opener::{resolve, resolve_named, Opener};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named strategic personality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Personality {
    #[default]
    Standard,
    Economic,
    Aggressive,
    Cheese,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Standard,
        Personality::Economic,
        Personality::Aggressive,
        Personality::Cheese,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Personality::Standard => "Standard",
            Personality::Economic => "Economic",
            Personality::Aggressive => "Aggressive",
            Personality::Cheese => "Cheese",
        }
    }

    /// Case-insensitive parse; `None` for unknown names
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Percentage applied to an opener's base attack threshold
    pub fn attack_threshold_percent(&self) -> u32 {
        match self {
            Personality::Standard | Personality::Economic => 100,
            Personality::Aggressive => 80,
            Personality::Cheese => 60,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for p in Personality::ALL {
            assert_eq!(Personality::parse(p.name()), Some(p));
        }
        assert_eq!(Personality::parse("cheese"), Some(Personality::Cheese));
        assert_eq!(Personality::parse("Turtle"), None);
    }

    #[test]
    fn test_threshold_percent_only_lowers() {
        assert!(Personality::ALL
            .iter()
            .all(|p| p.attack_threshold_percent() <= 100));
        assert!(
            Personality::Cheese.attack_threshold_percent()
                < Personality::Aggressive.attack_threshold_percent()
        );
    }
}
