//! Race controllers
//!
//! Architecture: trait + shared core
//! - `RaceController` drives the fixed rule-block pipeline each tick
//! - `ControllerCore` holds the per-match skill profile, opener and RNG
//! - One implementation per race supplies the block bodies

pub mod attack;
pub mod desired;
pub mod pipeline;
pub mod protoss;
pub mod terran;
pub mod zerg;

pub use attack::{attack_threshold, dispatch_attack, ArmyComposition, AttackPhase};
pub use desired::desired_production;
pub use pipeline::{ControllerCore, RuleBlock};
pub use protoss::ProtossController;
pub use terran::TerranController;
pub use zerg::ZergController;

use crate::command::CommandBatch;
use crate::core::config::{BotSettings, MatchConfig};
use crate::core::types::{Iteration, Race};
use crate::personality::Opener;
use crate::skill::SkillProfile;
use crate::snapshot::StateSnapshot;

/// Trait for race controller implementations
pub trait RaceController {
    fn core(&self) -> &ControllerCore;

    fn core_mut(&mut self) -> &mut ControllerCore;

    /// Evaluate one rule block against the snapshot, appending to `batch`
    fn run_block(&mut self, block: RuleBlock, snapshot: &StateSnapshot, batch: &mut CommandBatch);

    /// Process a single tick - returns the commands for the sink.
    ///
    /// Skipped steps and ticks after match end yield an empty batch.
    fn on_tick(&mut self, iteration: Iteration, snapshot: &StateSnapshot) -> CommandBatch {
        let mut batch = CommandBatch::new(iteration);
        if self.core().is_terminated() || self.core().skill().should_skip_step(iteration) {
            return batch;
        }

        for block in RuleBlock::ORDER {
            let before = batch.len();
            self.run_block(block, snapshot, &mut batch);
            if batch.len() > before {
                tracing::debug!("{}: {} commands", block.name(), batch.len() - before);
            }
        }

        batch
    }

    /// Mark the match as over; later ticks do nothing
    fn on_match_end(&mut self) {
        tracing::info!("{} controller finished", self.race());
        self.core_mut().terminate();
    }

    fn race(&self) -> Race {
        self.core().race()
    }

    fn opener(&self) -> Opener {
        self.core().opener()
    }

    fn skill(&self) -> &SkillProfile {
        self.core().skill()
    }

    fn attack_threshold(&self) -> u32 {
        self.core().attack_threshold()
    }
}

/// Controller for `race` with a fixed RNG seed
pub fn for_race(race: Race, settings: BotSettings, seed: u64) -> Box<dyn RaceController> {
    match race {
        Race::Protoss => Box::new(ProtossController::with_seed(settings, seed)),
        Race::Terran => Box::new(TerranController::with_seed(settings, seed)),
        Race::Zerg => Box::new(ZergController::with_seed(settings, seed)),
    }
}

/// Controller for a loaded match configuration
pub fn from_config(config: &MatchConfig) -> Box<dyn RaceController> {
    for_race(config.race, config.settings, config.seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Rating;
    use crate::core::types::Point2;
    use crate::personality::Personality;

    #[test]
    fn test_for_race_dispatch() {
        for race in Race::ALL {
            let controller = for_race(race, BotSettings::default(), 1);
            assert_eq!(controller.race(), race);
            assert_eq!(controller.opener(), Opener::standard_for(race));
        }
    }

    #[test]
    fn test_skipped_steps_emit_nothing() {
        // Rating 0: delay 6, acts on multiples of 7
        let settings = BotSettings::new(Rating::new(0), Personality::Standard);
        let mut controller = for_race(Race::Terran, settings, 3);
        let snapshot = StateSnapshot::new(Point2::new(20.0, 20.0))
            .with_resources(1000, 0)
            .with_supply(14, 15)
            .with(crate::catalog::UnitTypeId::CommandCenter, Point2::new(20.0, 20.0));
        for iteration in 1..7 {
            assert!(controller.on_tick(iteration, &snapshot).is_empty());
        }
    }

    #[test]
    fn test_no_commands_after_match_end() {
        let settings = BotSettings::new(Rating::new(7000), Personality::Standard);
        let mut controller = for_race(Race::Protoss, settings, 3);
        let snapshot = StateSnapshot::new(Point2::new(20.0, 20.0))
            .with_resources(1000, 0)
            .with_supply(14, 15)
            .with(crate::catalog::UnitTypeId::Nexus, Point2::new(20.0, 20.0));
        assert!(!controller.on_tick(0, &snapshot).is_empty());
        controller.on_match_end();
        assert!(controller.on_tick(2, &snapshot).is_empty());
    }
}
