//! Protoss controller
//!
//! Gateway army with Stalkers once the Cybernetics Core is up, Immortals
//! and an Observer off the Robotics Facility, Chrono Boost on whatever is
//! busiest.

use crate::catalog::{AbilityId, BuffId, UnitTypeId, UpgradeId};
use crate::command::{Command, CommandBatch};
use crate::controller::attack::{dispatch_attack, ArmyComposition};
use crate::controller::desired::desired_production;
use crate::controller::pipeline::{
    build_once, expand_now, research_in_order, standard_expansion, supply_needed, take_gas,
    train_workers, ControllerCore, RuleBlock,
};
use crate::controller::RaceController;
use crate::core::config::BotSettings;
use crate::core::types::{Point2, Race, Tag};
use crate::personality::Opener;
use crate::snapshot::{closest, StateSnapshot, UnitView};

const SUPPLY_THRESHOLD: u32 = 5;
const CANNON_COUNT: usize = 4;

const COMPOSITION: ArmyComposition = ArmyComposition {
    army: &[UnitTypeId::Zealot, UnitTypeId::Stalker, UnitTypeId::Immortal],
    support: &[UnitTypeId::Observer],
};

/// Chrono Boost priority, highest first
const CHRONO_PRIORITY: [&[UnitTypeId]; 3] = [
    &[
        UnitTypeId::CyberneticsCore,
        UnitTypeId::Forge,
        UnitTypeId::TwilightCouncil,
    ],
    &[UnitTypeId::Gateway, UnitTypeId::RoboticsFacility],
    &[UnitTypeId::Nexus],
];

/// Upgrade priority; each goes to the structure that researches it
const RESEARCH: [UpgradeId; 3] = [
    UpgradeId::WarpGateResearch,
    UpgradeId::ProtossGroundWeaponsLevel1,
    UpgradeId::Charge,
];

pub struct ProtossController {
    core: ControllerCore,
}

impl ProtossController {
    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(settings: BotSettings, seed: u64) -> Self {
        Self {
            core: ControllerCore::new(Race::Protoss, settings, seed),
        }
    }

    /// Ready Pylon closest to the main base; all structures go next to it
    fn build_anchor(snapshot: &StateSnapshot) -> Option<Point2> {
        let main = snapshot.main_base()?;
        closest(snapshot.ready_of(UnitTypeId::Pylon), main.position).map(|p| p.position)
    }

    fn manage_supply(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if !supply_needed(&mut self.core, snapshot, SUPPLY_THRESHOLD) {
            return;
        }
        if let Some(main) = snapshot.main_base() {
            batch.push(Command::build(UnitTypeId::Pylon, main.position));
        }
    }

    fn execute_opener(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if self.core.opener_done() {
            return;
        }

        match self.core.opener() {
            Opener::NexusFirst => {
                if snapshot.townhall_count() >= 2 {
                    self.core.mark_opener_done();
                } else if snapshot.can_afford(UnitTypeId::Nexus)
                    && !snapshot.is_pending(UnitTypeId::Nexus)
                {
                    batch.extend(expand_now(snapshot, self.core.units().townhall));
                }
            }
            Opener::GateExpand => {
                if snapshot.townhall_count() >= 2 {
                    self.core.mark_opener_done();
                } else if snapshot.exists(UnitTypeId::Gateway)
                    && snapshot.can_afford(UnitTypeId::Nexus)
                    && !snapshot.is_pending(UnitTypeId::Nexus)
                {
                    batch.extend(expand_now(snapshot, self.core.units().townhall));
                }
            }
            Opener::CannonRush => {
                if snapshot.count(UnitTypeId::PhotonCannon) >= CANNON_COUNT {
                    self.core.mark_opener_done();
                    return;
                }
                let Some(anchor) = Self::build_anchor(snapshot) else {
                    return;
                };
                if !snapshot.exists(UnitTypeId::Forge) {
                    build_once(snapshot, batch, UnitTypeId::Forge, anchor);
                } else if snapshot.requirement_met(UnitTypeId::PhotonCannon)
                    && snapshot.can_afford(UnitTypeId::PhotonCannon)
                {
                    batch.push(Command::build(UnitTypeId::PhotonCannon, anchor));
                }
            }
            // 4-gate only raises the gateway target
            _ => self.core.mark_opener_done(),
        }
    }

    fn manage_structures(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if self.core.opener() == Opener::CannonRush && !self.core.opener_done() {
            return;
        }
        let Some(anchor) = Self::build_anchor(snapshot) else {
            return;
        };
        let bases = snapshot.townhall_count();

        let gateways = desired_production(self.core.opener(), bases);
        if snapshot.count(UnitTypeId::Gateway) < gateways && snapshot.can_afford(UnitTypeId::Gateway)
        {
            batch.push(Command::build(UnitTypeId::Gateway, anchor));
        }

        if snapshot.ready_exists(UnitTypeId::Gateway) {
            build_once(snapshot, batch, UnitTypeId::CyberneticsCore, anchor);
        }

        if bases >= 2 && snapshot.exists(UnitTypeId::CyberneticsCore) {
            build_once(snapshot, batch, UnitTypeId::Forge, anchor);
        }
    }

    fn manage_tech(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        if snapshot.townhall_count() < 2 || !snapshot.ready_exists(UnitTypeId::CyberneticsCore) {
            return;
        }
        let Some(anchor) = Self::build_anchor(snapshot) else {
            return;
        };
        build_once(snapshot, batch, UnitTypeId::TwilightCouncil, anchor);
        build_once(snapshot, batch, UnitTypeId::RoboticsFacility, anchor);
    }

    /// Busy, unboosted structure to Chrono, by priority then tag
    fn chrono_target<'a>(snapshot: &'a StateSnapshot, taken: &[Tag]) -> Option<&'a UnitView> {
        CHRONO_PRIORITY.iter().find_map(|group| {
            snapshot
                .units
                .iter()
                .filter(|u| group.contains(&u.type_id))
                .filter(|u| u.is_ready() && !u.is_idle())
                .filter(|u| !u.has_buff(BuffId::ChronoBoosted) && !taken.contains(&u.tag))
                .min_by_key(|u| u.tag)
        })
    }

    fn manage_chrono(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let mut boosted: Vec<Tag> = Vec::new();

        for nexus in snapshot.casters(AbilityId::ChronoBoost) {
            let Some(target) = Self::chrono_target(snapshot, &boosted) else {
                return;
            };
            if self.core.makes_mistake() {
                continue;
            }
            boosted.push(target.tag);
            batch.push(Command::cast_on(nexus.tag, AbilityId::ChronoBoost, target.tag));
        }
    }

    fn manage_army(&mut self, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
        let core_ready = snapshot.ready_exists(UnitTypeId::CyberneticsCore);
        for gateway in snapshot.idle_producers(UnitTypeId::Zealot) {
            if core_ready && snapshot.can_afford(UnitTypeId::Stalker) {
                batch.push(Command::train(gateway.tag, UnitTypeId::Stalker));
            } else if snapshot.can_afford(UnitTypeId::Zealot) {
                batch.push(Command::train(gateway.tag, UnitTypeId::Zealot));
            }
        }

        let need_observer = !snapshot.exists(UnitTypeId::Observer)
            && !snapshot.is_pending(UnitTypeId::Observer);
        for (i, robo) in snapshot.idle_producers(UnitTypeId::Immortal).enumerate() {
            if i == 0 && need_observer {
                if snapshot.can_afford(UnitTypeId::Observer) {
                    batch.push(Command::train(robo.tag, UnitTypeId::Observer));
                }
            } else if snapshot.can_afford(UnitTypeId::Immortal) {
                batch.push(Command::train(robo.tag, UnitTypeId::Immortal));
            }
        }
    }
}

impl RaceController for ProtossController {
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
                if snapshot.exists(UnitTypeId::Gateway) {
                    take_gas(&self.core, snapshot, batch);
                }
            }
            RuleBlock::Structures => self.manage_structures(snapshot, batch),
            RuleBlock::TechTier => self.manage_tech(snapshot, batch),
            RuleBlock::Research => research_in_order(snapshot, batch, &RESEARCH),
            RuleBlock::Energy => self.manage_chrono(snapshot, batch),
            RuleBlock::Army => self.manage_army(snapshot, batch),
            RuleBlock::Attack => {
                dispatch_attack(snapshot, batch, COMPOSITION, self.core.attack_threshold());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CastTarget;
    use crate::core::config::Rating;
    use crate::personality::Personality;

    fn main_pos() -> Point2 {
        Point2::new(30.0, 30.0)
    }

    /// Error-free, no action delay
    fn controller(personality: Personality) -> ProtossController {
        ProtossController::with_seed(BotSettings::new(Rating::new(7000), personality), 11)
    }

    fn opening() -> StateSnapshot {
        StateSnapshot::new(main_pos())
            .with_supply(12, 15)
            .with(UnitTypeId::Nexus, main_pos())
            .with_n(UnitTypeId::Probe, 12, Point2::new(33.0, 30.0))
            .with_expansion(main_pos())
            .with_expansion(Point2::new(50.0, 30.0))
            .with_enemy_start(Point2::new(120.0, 120.0))
    }

    #[test]
    fn test_pylon_when_supply_tight() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening().with_resources(100, 0);
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Pylon), 1);
    }

    #[test]
    fn test_probe_from_idle_nexus() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening().with_resources(50, 0).with_supply(12, 23);
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Probe), 1);
    }

    #[test]
    fn test_nexus_first_expands_immediately() {
        let mut ai = controller(Personality::Economic);
        assert_eq!(ai.opener(), Opener::NexusFirst);
        let snapshot = opening().with_resources(400, 0).with_supply(12, 23);
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Nexus), 1);
    }

    #[test]
    fn test_gate_expand_waits_for_gateway() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening().with_resources(400, 0).with_supply(12, 23);
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Nexus), 0);

        let snapshot = snapshot.with(UnitTypeId::Pylon, main_pos()).with_unit(
            UnitView::new(Tag(500), UnitTypeId::Gateway, main_pos()).under_construction(0.3),
        );
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Nexus), 1);
    }

    #[test]
    fn test_gateways_follow_desired_count() {
        let mut ai = controller(Personality::Aggressive);
        assert_eq!(ai.opener(), Opener::FourGate);
        let snapshot = opening()
            .with_resources(150, 0)
            .with_supply(12, 23)
            .with(UnitTypeId::Pylon, main_pos())
            .with_n(UnitTypeId::Gateway, 3, main_pos());
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Gateway), 1);

        let snapshot = snapshot.with(UnitTypeId::Gateway, main_pos());
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Gateway), 0);
    }

    #[test]
    fn test_no_structures_without_pylon() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening().with_resources(1000, 0).with_supply(12, 23);
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Gateway), 0);
    }

    #[test]
    fn test_cannon_rush_forge_then_cannons() {
        let mut ai = controller(Personality::Cheese);
        assert_eq!(ai.opener(), Opener::CannonRush);
        let snapshot = opening()
            .with_resources(1000, 0)
            .with_supply(12, 23)
            .with(UnitTypeId::Pylon, main_pos());
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Forge), 1);
        assert_eq!(batch.count_producing(UnitTypeId::Gateway), 0);

        let snapshot = snapshot.with(UnitTypeId::Forge, main_pos());
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::PhotonCannon), 1);
        assert_eq!(batch.count_producing(UnitTypeId::Gateway), 0);

        let snapshot = snapshot.with_n(UnitTypeId::PhotonCannon, 4, main_pos());
        let batch = ai.on_tick(2, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::PhotonCannon), 0);
        assert_eq!(batch.count_producing(UnitTypeId::Gateway), 1);
    }

    #[test]
    fn test_chrono_prefers_research() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening()
            .with_supply(30, 46)
            .with(UnitTypeId::Pylon, main_pos())
            .with_unit(UnitView::new(Tag(900), UnitTypeId::Gateway, main_pos()).with_orders(1))
            .with_unit(
                UnitView::new(Tag(901), UnitTypeId::CyberneticsCore, main_pos()).with_orders(1),
            )
            .with_unit(UnitView::new(Tag(902), UnitTypeId::Nexus, main_pos()).with_energy(60.0));
        let batch = ai.on_tick(0, &snapshot);
        let targets: Vec<_> = batch
            .iter()
            .filter_map(|c| match c {
                Command::Cast { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![CastTarget::Unit(Tag(901))]);
    }

    #[test]
    fn test_chrono_skips_boosted() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening()
            .with_supply(30, 46)
            .with_unit(
                UnitView::new(Tag(901), UnitTypeId::Gateway, main_pos())
                    .with_orders(1)
                    .with_buff(BuffId::ChronoBoosted),
            )
            .with_unit(UnitView::new(Tag(902), UnitTypeId::Nexus, main_pos()).with_energy(60.0));
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.casts(AbilityId::ChronoBoost), 0);
    }

    #[test]
    fn test_stalkers_after_core() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening()
            .with_resources(300, 100)
            .with_supply(20, 46)
            .with(UnitTypeId::Gateway, main_pos());
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Zealot), 1);

        let snapshot = snapshot.with(UnitTypeId::CyberneticsCore, main_pos());
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Stalker), 1);
    }

    #[test]
    fn test_robo_observer_first() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening()
            .with_resources(600, 300)
            .with_supply(20, 46)
            .with(UnitTypeId::RoboticsFacility, main_pos());
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Observer), 1);
        assert_eq!(batch.count_producing(UnitTypeId::Immortal), 0);

        let snapshot = snapshot.with(UnitTypeId::Observer, main_pos());
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Immortal), 1);
    }

    #[test]
    fn test_attack_with_observer_following() {
        let mut ai = controller(Personality::Aggressive);
        let threshold = ai.attack_threshold() as usize;
        assert_eq!(threshold, 7);
        let snapshot = opening()
            .with_supply(40, 46)
            .with_n(UnitTypeId::Stalker, threshold, Point2::new(60.0, 60.0))
            .with(UnitTypeId::Observer, main_pos());
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.attack_orders(), threshold);
        assert!(batch
            .iter()
            .any(|c| matches!(c, Command::Move { target, .. } if *target == Point2::new(60.0, 60.0))));
    }

    /// Pylon, Gateway and Cybernetics Core all finished
    fn gateway_tech() -> StateSnapshot {
        opening()
            .with_resources(1000, 1000)
            .with_supply(30, 46)
            .with(UnitTypeId::Pylon, main_pos())
            .with(UnitTypeId::Gateway, main_pos())
            .with(UnitTypeId::CyberneticsCore, main_pos())
    }

    #[test]
    fn test_tech_tier_waits_for_natural() {
        let mut ai = controller(Personality::Standard);
        let batch = ai.on_tick(0, &gateway_tech());
        assert_eq!(batch.count_producing(UnitTypeId::TwilightCouncil), 0);
        assert_eq!(batch.count_producing(UnitTypeId::RoboticsFacility), 0);
        assert_eq!(batch.count_producing(UnitTypeId::Forge), 0);

        let snapshot = gateway_tech().with(UnitTypeId::Nexus, Point2::new(50.0, 30.0));
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::TwilightCouncil), 1);
        assert_eq!(batch.count_producing(UnitTypeId::RoboticsFacility), 1);
        assert_eq!(batch.count_producing(UnitTypeId::Forge), 1);

        // Already standing: not requested again
        let snapshot = snapshot
            .with(UnitTypeId::TwilightCouncil, main_pos())
            .with(UnitTypeId::RoboticsFacility, main_pos())
            .with(UnitTypeId::Forge, main_pos());
        let batch = ai.on_tick(2, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::TwilightCouncil), 0);
        assert_eq!(batch.count_producing(UnitTypeId::RoboticsFacility), 0);
        assert_eq!(batch.count_producing(UnitTypeId::Forge), 0);
    }

    #[test]
    fn test_research_on_each_tech_structure() {
        let mut ai = controller(Personality::Standard);
        let snapshot = gateway_tech()
            .with(UnitTypeId::Forge, main_pos())
            .with(UnitTypeId::TwilightCouncil, main_pos())
            .with_researching(UpgradeId::WarpGateResearch);
        let batch = ai.on_tick(0, &snapshot);
        let researched: Vec<_> = batch
            .iter()
            .filter_map(|c| match c {
                Command::Research { upgrade, .. } => Some(*upgrade),
                _ => None,
            })
            .collect();
        assert_eq!(
            researched,
            vec![UpgradeId::ProtossGroundWeaponsLevel1, UpgradeId::Charge]
        );
    }

    #[test]
    fn test_gas_after_gateway() {
        let mut ai = controller(Personality::Standard);
        let snapshot = opening()
            .with_resources(75, 0)
            .with_supply(14, 23)
            .with_geyser(Point2::new(37.0, 30.0));
        let batch = ai.on_tick(0, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Assimilator), 0);

        let snapshot = snapshot.with_unit(
            UnitView::new(Tag(600), UnitTypeId::Gateway, main_pos()).under_construction(0.1),
        );
        let batch = ai.on_tick(1, &snapshot);
        assert_eq!(batch.count_producing(UnitTypeId::Assimilator), 1);
    }
}
