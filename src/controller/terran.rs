//! Terran controller
//!
//! Barracks infantry (Marines, Marauders off Tech Labs) with Medivac
//! support, Orbital Commands dropping MULEs on the richest patch.

use crate::catalog::{AbilityId, UnitTypeId, UpgradeId};
use crate::command::{Command, CommandBatch};
use crate::controller::attack::{dispatch_attack, ArmyComposition};
use crate::controller::desired::desired_production;
use crate::controller::pipeline::{
    build_once, expand_now, research_in_order, standard_expansion, supply_needed, take_gas,
    train_workers, ControllerCore, RuleBlock,
};
use crate::controller::RaceController;
use crate::core::config::BotSettings;
use crate::core::types::{Point2, Race};
use crate::personality::Opener;
use crate::snapshot::{ResourceNode, StateSnapshot};

const SUPPLY_THRESHOLD: u32 = 5;
/// Supply cap a lone Command Center provides
const BASE_SUPPLY_CAP: u32 = 15;
/// Fraction of the way to the enemy base for proxy Barracks
const PROXY_FRACTION: f32 = 2.0 / 3.0;
const PROXY_BARRACKS: usize = 2;
/// MULE targets must be this close to the Orbital Command
const MULE_RADIUS: f32 = 10.0;

/// Upgrade priority; each goes to the structure that researches it
const RESEARCH: [UpgradeId; 3] = [
    UpgradeId::Stimpack,
    UpgradeId::CombatShield,
    UpgradeId::TerranInfantryWeaponsLevel1,
];

const COMPOSITION: ArmyComposition = ArmyComposition {
    army: &[UnitTypeId::Marine, UnitTypeId::Marauder],
    support: &[UnitTypeId::Medivac],
};

pub struct TerranController {
    core: ControllerCore,
}

impl TerranController {
    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(settings: BotSettings, seed: u64) -> Self {
        Self {
            core: ControllerCore::new(Race::Terran, settings, seed),
        }
    }

    /// Where the next Barracks goes: forward while proxying, else the main
    fn barracks_site(&self, snapshot: &StateSnapshot, main: Point2) -> Point2 {
        if self.core.opener() == Opener::ProxyRax && !self.core.opener_done() {
            if let Some(enemy) = snapshot.enemy_start() {
                return snapshot.start_location.lerp(&enemy, PROXY_FRACTION);
            }
        }
        main
    }

    fn manage_supply(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if !supply_needed(&mut self.core, snapshot, SUPPLY_THRESHOLD) {
            return;
        }
        if let Some(main) = snapshot.main_base() {
            batch.push(Command::build(UnitTypeId::SupplyDepot, main.position));
        }
    }

    fn execute_opener(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if self.core.opener_done() {
            return;
        }

        match self.core.opener() {
            Opener::CcFirst => {
                if snapshot.townhall_count() >= 2 {
                    self.core.mark_opener_done();
                } else if snapshot.can_afford(UnitTypeId::CommandCenter)
                    && !snapshot.is_pending(UnitTypeId::CommandCenter)
                {
                    batch.extend(expand_now(snapshot, self.core.units().townhall));
                }
            }
            Opener::RaxExpand => {
                if snapshot.townhall_count() >= 2 {
                    self.core.mark_opener_done();
                } else if snapshot.exists(UnitTypeId::Barracks)
                    && snapshot.can_afford(UnitTypeId::CommandCenter)
                    && !snapshot.is_pending(UnitTypeId::CommandCenter)
                {
                    batch.extend(expand_now(snapshot, self.core.units().townhall));
                }
            }
            Opener::ProxyRax => {
                // Placement happens with the other structures
                if snapshot.count(UnitTypeId::Barracks) >= PROXY_BARRACKS {
                    self.core.mark_opener_done();
                }
            }
            _ => self.core.mark_opener_done(),
        }
    }

    fn manage_structures(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let Some(main) = snapshot.main_base().map(|m| m.position) else {
            return;
        };
        let bases = snapshot.townhall_count();

        let barracks = desired_production(self.core.opener(), bases);
        let depot_ready = snapshot.ready_exists(UnitTypeId::SupplyDepot)
            || snapshot.supply_cap > BASE_SUPPLY_CAP;
        if depot_ready
            && snapshot.count(UnitTypeId::Barracks) < barracks
            && snapshot.can_afford(UnitTypeId::Barracks)
        {
            let site = self.barracks_site(snapshot, main);
            batch.push(Command::build(UnitTypeId::Barracks, site));
        }

        if bases >= 2 {
            build_once(snapshot, batch, UnitTypeId::EngineeringBay, main);
        }
    }

    fn manage_tech(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let barracks_ready = snapshot.ready_exists(UnitTypeId::Barracks);

        if barracks_ready {
            for cc in snapshot.idle_producers(UnitTypeId::OrbitalCommand) {
                if snapshot.can_afford(UnitTypeId::OrbitalCommand) {
                    batch.push(Command::Morph {
                        unit: cc.tag,
                        into: UnitTypeId::OrbitalCommand,
                    });
                }
            }
        }

        // First add-on is a Tech Lab, every later one a Reactor
        let mut has_tech_lab = snapshot.exists(UnitTypeId::BarracksTechLab);
        for rax in snapshot.idle_producers(UnitTypeId::BarracksTechLab) {
            if rax.addon.is_some() {
                continue;
            }
            let addon = if has_tech_lab {
                UnitTypeId::BarracksReactor
            } else {
                UnitTypeId::BarracksTechLab
            };
            if !snapshot.can_afford(addon) {
                continue;
            }
            has_tech_lab = true;
            batch.push(Command::BuildAddon {
                producer: rax.tag,
                addon,
            });
        }

        let Some(main) = snapshot.main_base().map(|m| m.position) else {
            return;
        };
        if snapshot.townhall_count() >= 2 && barracks_ready {
            build_once(snapshot, batch, UnitTypeId::Factory, main);
        }
        if snapshot.ready_exists(UnitTypeId::Factory) {
            build_once(snapshot, batch, UnitTypeId::Starport, main);
        }
    }

    /// Fullest mineral field near `point`, ties by lowest tag
    fn richest_field(snapshot: &StateSnapshot, point: Point2) -> Option<&ResourceNode> {
        snapshot
            .mineral_fields_near(point, MULE_RADIUS)
            .max_by(|a, b| a.contents.cmp(&b.contents).then(b.tag.cmp(&a.tag)))
    }

    fn manage_mules(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        for orbital in snapshot.casters(AbilityId::CalldownMule) {
            let Some(field) = Self::richest_field(snapshot, orbital.position) else {
                continue;
            };
            if self.core.makes_mistake() {
                continue;
            }
            batch.push(Command::cast_on(orbital.tag, AbilityId::CalldownMule, field.tag));
        }
    }

    fn manage_army(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        for rax in snapshot.ready_of(UnitTypeId::Barracks) {
            let slots = if rax.addon == Some(UnitTypeId::BarracksReactor) {
                2
            } else {
                1
            };
            if rax.order_count >= slots {
                continue;
            }
            if rax.addon == Some(UnitTypeId::BarracksTechLab)
                && snapshot.can_afford(UnitTypeId::Marauder)
            {
                batch.push(Command::train(rax.tag, UnitTypeId::Marauder));
            } else if snapshot.can_afford(UnitTypeId::Marine) {
                batch.push(Command::train(rax.tag, UnitTypeId::Marine));
            }
        }

        for starport in snapshot.idle_producers(UnitTypeId::Medivac) {
            if snapshot.can_afford(UnitTypeId::Medivac) {
                batch.push(Command::train(starport.tag, UnitTypeId::Medivac));
            }
        }
    }
}

impl RaceController for TerranController {
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
            RuleBlock::Workers => train_workers(&mut self.core, snapshot, batch),
            RuleBlock::Expansion => standard_expansion(&self.core, snapshot, batch),
            RuleBlock::Gas => {
                if snapshot.exists(UnitTypeId::Barracks) {
                    take_gas(&self.core, snapshot, batch);
                }
            }
            RuleBlock::Structures => self.manage_structures(snapshot, batch),
            RuleBlock::TechTier => self.manage_tech(snapshot, batch),
            RuleBlock::Research => research_in_order(snapshot, batch, &RESEARCH),
            RuleBlock::Energy => self.manage_mules(snapshot, batch),
            RuleBlock::Army => self.manage_army(snapshot, batch),
            RuleBlock::Attack => {
                dispatch_attack(snapshot, batch, COMPOSITION, self.core.attack_threshold());
            }
        }
    }
}
