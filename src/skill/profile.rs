//! Rating-driven skill throttling
//!
//! A rating is turned into two human limitations:
//! - an action delay that restricts which driver steps the controller may
//!   act on (an actions-per-minute ceiling)
//! - an error rate that randomly drops individual fallible actions
//!   (missed supply, missed worker cycles, missed injects)

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::Rating;
use crate::core::types::Iteration;

/// Rating at or above which no action is ever dropped
pub const ERROR_FREE_RATING: u16 = 6000;
/// Rating at or above which the controller acts on every step
pub const FULL_SPEED_RATING: u16 = 5000;
/// Rating points per additional skipped step below `FULL_SPEED_RATING`
const RATING_PER_DELAY_STEP: f64 = 750.0;

/// Human-readable skill bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillTier {
    BronzeSilver,
    GoldPlat,
    Diamond,
    Master,
    Grandmaster,
}

impl SkillTier {
    /// Step function over the rating breakpoints
    pub fn from_rating(rating: u16) -> Self {
        match rating {
            0..=2499 => SkillTier::BronzeSilver,
            2500..=3499 => SkillTier::GoldPlat,
            3500..=4499 => SkillTier::Diamond,
            4500..=5499 => SkillTier::Master,
            _ => SkillTier::Grandmaster,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillTier::BronzeSilver => "Bronze/Silver",
            SkillTier::GoldPlat => "Gold/Plat",
            SkillTier::Diamond => "Diamond",
            SkillTier::Master => "Master",
            SkillTier::Grandmaster => "GM",
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable per-match skill model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub rating: Rating,
    pub tier: SkillTier,
    /// Probability in [0, 0.6] that a fallible action is dropped
    pub error_rate: f64,
    /// Steps skipped between two acting steps
    pub action_delay: u32,
}

impl SkillProfile {
    /// Derive the profile for a rating. Total over the whole rating range.
    pub fn derive(rating: Rating) -> Self {
        let r = rating.value();
        Self {
            rating,
            tier: SkillTier::from_rating(r),
            error_rate: error_rate_for(r),
            action_delay: action_delay_for(r),
        }
    }

    /// True when the controller must idle on this step.
    ///
    /// With a delay of `d` the controller acts on iterations 0, d+1, 2(d+1), ...
    pub fn should_skip_step(&self, iteration: Iteration) -> bool {
        if self.action_delay == 0 {
            return false;
        }
        iteration % (self.action_delay as u64 + 1) != 0
    }

    /// Independent Bernoulli trial with probability `error_rate`
    pub fn should_make_mistake<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if self.error_rate <= 0.0 {
            return false;
        }
        rng.gen::<f64>() < self.error_rate
    }
}

impl Default for SkillProfile {
    fn default() -> Self {
        Self::derive(Rating::default())
    }
}

/// `(6000 - r) / 10000` below 6000, zero from there on
pub fn error_rate_for(rating: u16) -> f64 {
    if rating >= ERROR_FREE_RATING {
        return 0.0;
    }
    ((ERROR_FREE_RATING - rating) as f64 / 10_000.0).max(0.0)
}

/// `floor((5000 - r) / 750)` below 5000, zero from there on
pub fn action_delay_for(rating: u16) -> u32 {
    if rating >= FULL_SPEED_RATING {
        return 0;
    }
    ((FULL_SPEED_RATING - rating) as f64 / RATING_PER_DELAY_STEP).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn profile(rating: i64) -> SkillProfile {
        SkillProfile::derive(Rating::new(rating))
    }

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(profile(2499).tier.label(), "Bronze/Silver");
        assert_eq!(profile(2500).tier.label(), "Gold/Plat");
        assert_eq!(profile(3499).tier.label(), "Gold/Plat");
        assert_eq!(profile(3500).tier.label(), "Diamond");
        assert_eq!(profile(4500).tier.label(), "Master");
        assert_eq!(profile(5499).tier.label(), "Master");
        assert_eq!(profile(5500).tier.label(), "GM");
        assert_eq!(profile(9999).tier.label(), "GM");
    }

    #[test]
    fn test_error_rate_boundaries() {
        assert!((profile(0).error_rate - 0.6).abs() < 1e-12);
        assert!((profile(3000).error_rate - 0.3).abs() < 1e-12);
        assert_eq!(profile(6000).error_rate, 0.0);
        assert_eq!(profile(9999).error_rate, 0.0);
    }

    #[test]
    fn test_action_delay_values() {
        assert_eq!(profile(0).action_delay, 6);
        assert_eq!(profile(2000).action_delay, 4);
        assert_eq!(profile(3000).action_delay, 2);
        assert_eq!(profile(4999).action_delay, 0);
        assert_eq!(profile(5000).action_delay, 0);
    }

    #[test]
    fn test_skip_step_with_delay_three() {
        let mut p = profile(6500);
        p.action_delay = 3;
        for iteration in 0..40u64 {
            let acts = iteration % 4 == 0;
            assert_eq!(p.should_skip_step(iteration), !acts, "iteration {}", iteration);
        }
    }

    #[test]
    fn test_skip_step_never_without_delay() {
        let p = profile(5000);
        assert!((0..1000).all(|i| !p.should_skip_step(i)));
    }

    #[test]
    fn test_error_free_profile_never_mistakes() {
        let p = profile(6000);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..10_000).all(|_| !p.should_make_mistake(&mut rng)));
    }

    #[test]
    fn test_mistakes_reproducible_with_seed() {
        let p = profile(1000);
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        let left: Vec<bool> = (0..200).map(|_| p.should_make_mistake(&mut a)).collect();
        let right: Vec<bool> = (0..200).map(|_| p.should_make_mistake(&mut b)).collect();
        assert_eq!(left, right);
    }
}
