//! Skill model derived from the configured rating

pub mod profile;

pub use profile::{action_delay_for, error_rate_for, SkillProfile, SkillTier};
