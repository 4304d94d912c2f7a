//! Zerg controller
//!
//! Everything hatches from larva. Queens inject, Zerglings early and
//! Roaches once the warren is up.

use crate::catalog::{AbilityId, BuffId, UnitTypeId, UpgradeId};
use crate::command::{Command, CommandBatch};
use crate::controller::attack::{dispatch_attack, ArmyComposition};
use crate::controller::desired::desired_production;
use crate::controller::pipeline::{
    build_once, expand_now, research_in_order, standard_expansion, supply_needed, take_gas,
    ControllerCore, RuleBlock,
};
use crate::controller::RaceController;
use crate::core::config::BotSettings;
use crate::core::types::{Race, Tag};
use crate::personality::{Opener, Personality};
use crate::snapshot::{closest, StateSnapshot};

const SUPPLY_THRESHOLD: u32 = 4;
/// Drones needed before army production starts (Cheese ignores this)
const ARMY_MIN_WORKERS: usize = 16;

const RESEARCH: [UpgradeId; 1] = [UpgradeId::MetabolicBoost];

const COMPOSITION: ArmyComposition = ArmyComposition {
    army: &[UnitTypeId::Zergling, UnitTypeId::Roach],
    support: &[UnitTypeId::Overseer],
};

pub struct ZergController {
    core: ControllerCore,
}

impl ZergController {
    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(settings: BotSettings, seed: u64) -> Self {
        Self {
            core: ControllerCore::new(Race::Zerg, settings, seed),
        }
    }

    fn hatcheries(snapshot: &StateSnapshot) -> usize {
        snapshot.count(UnitTypeId::Hatchery)
    }

    /// Morph `unit` from a random larva, if there is one
    fn hatch(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch, unit: UnitTypeId) {
        if let Some(larva) = self.core.random_larva(snapshot) {
            batch.push(Command::train(larva.tag, unit));
        }
    }

    fn manage_supply(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if snapshot.exists(UnitTypeId::Larva)
            && supply_needed(&mut self.core, snapshot, SUPPLY_THRESHOLD)
        {
            self.hatch(snapshot, batch, UnitTypeId::Overlord);
        }
    }

    fn execute_opener(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if self.core.opener_done() {
            return;
        }

        match self.core.opener() {
            Opener::TwelvePool => {
                if snapshot.exists(UnitTypeId::SpawningPool)
                    || snapshot.is_pending(UnitTypeId::SpawningPool)
                {
                    self.core.mark_opener_done();
                } else if let Some(main) = snapshot.main_base() {
                    build_once(snapshot, batch, UnitTypeId::SpawningPool, main.position);
                }
            }
            Opener::HatchFirst => {
                if Self::hatcheries(snapshot) >= 2 {
                    self.core.mark_opener_done();
                } else if snapshot.can_afford(UnitTypeId::Hatchery)
                    && !snapshot.is_pending(UnitTypeId::Hatchery)
                {
                    batch.extend(expand_now(snapshot, self.core.units().townhall));
                }
            }
            Opener::PoolFirst => {
                if Self::hatcheries(snapshot) >= 2 {
                    self.core.mark_opener_done();
                } else if snapshot.exists(UnitTypeId::SpawningPool)
                    && snapshot.can_afford(UnitTypeId::Hatchery)
                    && !snapshot.is_pending(UnitTypeId::Hatchery)
                {
                    batch.extend(expand_now(snapshot, self.core.units().townhall));
                }
            }
            _ => self.core.mark_opener_done(),
        }
    }

    /// Drones from larva, then Queens from idle Hatcheries
    fn manage_workers(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if snapshot.worker_count(UnitTypeId::Drone) < self.core.worker_cap()
            && snapshot.can_afford(UnitTypeId::Drone)
            && snapshot.exists(UnitTypeId::Larva)
            && !self.core.makes_mistake()
        {
            self.hatch(snapshot, batch, UnitTypeId::Drone);
        }

        if !snapshot.ready_exists(UnitTypeId::SpawningPool) {
            return;
        }
        // Queens (including queued) below 1.5 per hatchery
        let bases = Self::hatcheries(snapshot);
        let queens = snapshot.count(UnitTypeId::Queen)
            + snapshot.pending.get(&UnitTypeId::Queen).copied().unwrap_or(0) as usize;
        if queens * 2 >= bases * 3 {
            return;
        }
        for hatchery in snapshot.idle_producers(UnitTypeId::Queen) {
            if snapshot.can_afford(UnitTypeId::Queen) {
                batch.push(Command::train(hatchery.tag, UnitTypeId::Queen));
            }
        }
    }

    fn manage_structures(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let Some(main) = snapshot.main_base().map(|m| m.position) else {
            return;
        };
        let bases = Self::hatcheries(snapshot);

        // 12-pool places its own pool
        let opener_pool = self.core.opener() == Opener::TwelvePool && !self.core.opener_done();
        if !opener_pool
            && snapshot.count(UnitTypeId::SpawningPool)
                < desired_production(self.core.opener(), bases)
        {
            build_once(snapshot, batch, UnitTypeId::SpawningPool, main);
        }

        if self.core.opener() != Opener::TwelvePool && bases >= 2 {
            build_once(snapshot, batch, UnitTypeId::RoachWarren, main);
        }
    }

    fn manage_injects(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let mut injected: Vec<Tag> = Vec::new();

        for queen in snapshot.casters(AbilityId::InjectLarva) {
            let target = closest(
                snapshot.ready_of(UnitTypeId::Hatchery).filter(|h| {
                    !h.has_buff(BuffId::QueenSpawnLarvaTimer) && !injected.contains(&h.tag)
                }),
                queen.position,
            );
            let Some(hatchery) = target else {
                return;
            };
            if self.core.makes_mistake() {
                continue;
            }
            injected.push(hatchery.tag);
            batch.push(Command::cast_on(queen.tag, AbilityId::InjectLarva, hatchery.tag));
        }
    }

    fn manage_army(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let cheese = self.core.personality() == Personality::Cheese;
        if snapshot.worker_count(UnitTypeId::Drone) < ARMY_MIN_WORKERS && !cheese {
            return;
        }

        if !snapshot.ready_exists(UnitTypeId::SpawningPool) {
            return;
        }
        if snapshot.ready_exists(UnitTypeId::RoachWarren) && snapshot.can_afford(UnitTypeId::Roach)
        {
            self.hatch(snapshot, batch, UnitTypeId::Roach);
        } else if snapshot.can_afford(UnitTypeId::Zergling) {
            self.hatch(snapshot, batch, UnitTypeId::Zergling);
        }
    }
}

impl RaceController for ZergController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn run_block(&mut self, block: RuleBlock, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        match block {
            RuleBlock::Supply => self.manage_supply(snapshot, batch),
            RuleBlock::Opener => self.execute_opener(snapshot, batch),
            RuleBlock::Workers => self.manage_workers(snapshot, batch),
            RuleBlock::Expansion => standard_expansion(&self.core, snapshot, batch),
            RuleBlock::Gas => {
                if snapshot.exists(UnitTypeId::SpawningPool) {
                    take_gas(&self.core, snapshot, batch);
                }
            }
            RuleBlock::Structures => self.manage_structures(snapshot, batch),
            // Zerg tech is the Roach Warren, placed with the other structures
            RuleBlock::TechTier => {}
            RuleBlock::Research => research_in_order(snapshot, batch, &RESEARCH),
            RuleBlock::Energy => self.manage_injects(snapshot, batch),
            RuleBlock::Army => self.manage_army(snapshot, batch),
            RuleBlock::Attack => {
                dispatch_attack(snapshot, batch, COMPOSITION, self.core.attack_threshold());
            }
        }
    }
}
