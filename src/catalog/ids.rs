//! Research, ability and buff identifiers

use serde::{Deserialize, Serialize};

use crate::catalog::unit_type::{Cost, UnitTypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeId {
    WarpGateResearch,
    ProtossGroundWeaponsLevel1,
    Charge,
    Stimpack,
    CombatShield,
    TerranInfantryWeaponsLevel1,
    MetabolicBoost,
}

impl UpgradeId {
    pub fn cost(&self) -> Cost {
        match self {
            UpgradeId::WarpGateResearch => Cost::new(50, 50),
            UpgradeId::ProtossGroundWeaponsLevel1 => Cost::new(100, 100),
            UpgradeId::Charge => Cost::new(100, 100),
            UpgradeId::Stimpack => Cost::new(100, 100),
            UpgradeId::CombatShield => Cost::new(100, 100),
            UpgradeId::TerranInfantryWeaponsLevel1 => Cost::new(100, 100),
            UpgradeId::MetabolicBoost => Cost::new(100, 100),
        }
    }

    /// Structure that performs the research
    pub fn researched_from(&self) -> UnitTypeId {
        match self {
            UpgradeId::WarpGateResearch => UnitTypeId::CyberneticsCore,
            UpgradeId::ProtossGroundWeaponsLevel1 => UnitTypeId::Forge,
            UpgradeId::Charge => UnitTypeId::TwilightCouncil,
            UpgradeId::Stimpack | UpgradeId::CombatShield => UnitTypeId::BarracksTechLab,
            UpgradeId::TerranInfantryWeaponsLevel1 => UnitTypeId::EngineeringBay,
            UpgradeId::MetabolicBoost => UnitTypeId::SpawningPool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    ChronoBoost,
    CalldownMule,
    InjectLarva,
}

impl AbilityId {
    pub fn energy_cost(&self) -> f32 {
        match self {
            AbilityId::ChronoBoost => 50.0,
            AbilityId::CalldownMule => 50.0,
            AbilityId::InjectLarva => 25.0,
        }
    }

    pub fn caster(&self) -> UnitTypeId {
        match self {
            AbilityId::ChronoBoost => UnitTypeId::Nexus,
            AbilityId::CalldownMule => UnitTypeId::OrbitalCommand,
            AbilityId::InjectLarva => UnitTypeId::Queen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffId {
    ChronoBoosted,
    QueenSpawnLarvaTimer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Race;

    #[test]
    fn test_research_structure_matches_race() {
        assert_eq!(UpgradeId::Charge.researched_from().race(), Race::Protoss);
        assert_eq!(UpgradeId::Stimpack.researched_from().race(), Race::Terran);
        assert_eq!(UpgradeId::MetabolicBoost.researched_from().race(), Race::Zerg);
    }

    #[test]
    fn test_inject_is_cheapest_ability() {
        assert!(AbilityId::InjectLarva.energy_cost() < AbilityId::ChronoBoost.energy_cost());
        assert_eq!(AbilityId::CalldownMule.caster(), UnitTypeId::OrbitalCommand);
    }
}
