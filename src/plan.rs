//! Resolved match plan: what the bot will do before the first tick

use serde::Serialize;
use std::fmt;

use crate::controller::attack_threshold;
use crate::core::config::MatchConfig;
use crate::personality::resolve;
use crate::skill::SkillProfile;

#[derive(Debug, Clone, Serialize)]
pub struct MatchPlan {
    pub bot_name: String,
    pub race: String,
    pub rating: u16,
    pub tier: String,
    pub error_rate: f64,
    pub action_delay: u32,
    pub personality: String,
    pub opener: String,
    pub attack_threshold: u32,
    pub opponent: String,
    pub map: Option<String>,
    pub game_step: u32,
    pub realtime: bool,
    pub seed: u64,
}

impl MatchPlan {
    pub fn from_config(config: &MatchConfig) -> Self {
        let skill = SkillProfile::derive(config.settings.rating);
        let personality = config.settings.personality;
        let opener = resolve(config.race, personality);

        Self {
            bot_name: config.bot_name.clone(),
            race: config.race.to_string(),
            rating: skill.rating.value(),
            tier: skill.tier.to_string(),
            error_rate: skill.error_rate,
            action_delay: skill.action_delay,
            personality: personality.name().to_string(),
            opener: opener.id().to_string(),
            attack_threshold: attack_threshold(opener, personality),
            opponent: config.opponent_id(),
            map: config.map.clone(),
            game_step: config.game_step,
            realtime: config.realtime,
            seed: config.seed,
        }
    }
}

impl fmt::Display for MatchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Match Plan")?;
        writeln!(f, "==========")?;
        writeln!(f, "Bot: {} ({})", self.bot_name, self.race)?;
        writeln!(f, "Rating: {} ({})", self.rating, self.tier)?;
        writeln!(f, "Error rate: {:.1}%", self.error_rate * 100.0)?;
        writeln!(f, "Action delay: {} steps", self.action_delay)?;
        writeln!(f, "Personality: {}", self.personality)?;
        writeln!(f, "Opener: {}", self.opener)?;
        writeln!(f, "Attack at: {} army units", self.attack_threshold)?;
        writeln!(f, "Opponent: {}", self.opponent)?;
        writeln!(f, "Map: {}", self.map.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "Client: game step {}, realtime {}", self.game_step, self.realtime)?;
        write!(f, "Seed: {}", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_for_aggressive_protoss() {
        let config = MatchConfig::from_toml_str(
            r#"
            race = "Protoss"
            rating = 6500
            personality = "Aggressive"
            map_pool = ["AcropolisLE"]
            seed = 3
            "#,
        )
        .unwrap();
        let plan = MatchPlan::from_config(&config);
        assert_eq!(plan.race, "Protoss");
        assert_eq!(plan.tier, "GM");
        assert_eq!(plan.error_rate, 0.0);
        assert_eq!(plan.action_delay, 0);
        assert_eq!(plan.opener, "4_GATE");
        assert_eq!(plan.attack_threshold, 7);
        assert_eq!(plan.map.as_deref(), Some("AcropolisLE"));
        assert_eq!(plan.game_step, 2);
        let text = plan.to_string();
        assert!(text.contains("Opener: 4_GATE"));
        assert!(text.contains("game step 2"));
    }
}
