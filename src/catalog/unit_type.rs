//! Unit and structure catalogue
//!
//! Every type the controllers reason about is a variant here, and every
//! property is an exhaustive `match`, so adding a type without giving it a
//! race, a cost, a producer and a prerequisite does not compile.

use serde::{Deserialize, Serialize};

use crate::core::types::Race;

/// Resource price of a unit, structure, morph or research
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cost {
    pub minerals: u32,
    pub vespene: u32,
}

impl Cost {
    pub const fn new(minerals: u32, vespene: u32) -> Self {
        Self { minerals, vespene }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitTypeId {
    // Protoss
    Nexus,
    Pylon,
    Assimilator,
    Gateway,
    CyberneticsCore,
    Forge,
    PhotonCannon,
    TwilightCouncil,
    RoboticsFacility,
    Probe,
    Zealot,
    Stalker,
    Immortal,
    Observer,
    // Terran
    CommandCenter,
    OrbitalCommand,
    SupplyDepot,
    Refinery,
    Barracks,
    BarracksTechLab,
    BarracksReactor,
    EngineeringBay,
    Factory,
    Starport,
    Scv,
    Mule,
    Marine,
    Marauder,
    Medivac,
    // Zerg
    Hatchery,
    Extractor,
    SpawningPool,
    RoachWarren,
    Larva,
    Drone,
    Overlord,
    Overseer,
    Queen,
    Zergling,
    Roach,
}

impl UnitTypeId {
    pub fn race(&self) -> Race {
        use UnitTypeId::*;
        match self {
            Nexus | Pylon | Assimilator | Gateway | CyberneticsCore | Forge | PhotonCannon
            | TwilightCouncil | RoboticsFacility | Probe | Zealot | Stalker | Immortal
            | Observer => Race::Protoss,
            CommandCenter | OrbitalCommand | SupplyDepot | Refinery | Barracks
            | BarracksTechLab | BarracksReactor | EngineeringBay | Factory | Starport | Scv
            | Mule | Marine | Marauder | Medivac => Race::Terran,
            Hatchery | Extractor | SpawningPool | RoachWarren | Larva | Drone | Overlord
            | Overseer | Queen | Zergling | Roach => Race::Zerg,
        }
    }

    /// Price to queue this type. Morphs (Orbital Command) cost the upgrade price.
    pub fn cost(&self) -> Cost {
        use UnitTypeId::*;
        match self {
            Nexus => Cost::new(400, 0),
            Pylon => Cost::new(100, 0),
            Assimilator => Cost::new(75, 0),
            Gateway => Cost::new(150, 0),
            CyberneticsCore => Cost::new(150, 0),
            Forge => Cost::new(150, 0),
            PhotonCannon => Cost::new(150, 0),
            TwilightCouncil => Cost::new(150, 100),
            RoboticsFacility => Cost::new(150, 100),
            Probe => Cost::new(50, 0),
            Zealot => Cost::new(100, 0),
            Stalker => Cost::new(125, 50),
            Immortal => Cost::new(275, 100),
            Observer => Cost::new(25, 75),
            CommandCenter => Cost::new(400, 0),
            OrbitalCommand => Cost::new(150, 0),
            SupplyDepot => Cost::new(100, 0),
            Refinery => Cost::new(75, 0),
            Barracks => Cost::new(150, 0),
            BarracksTechLab => Cost::new(50, 25),
            BarracksReactor => Cost::new(50, 50),
            EngineeringBay => Cost::new(125, 0),
            Factory => Cost::new(150, 100),
            Starport => Cost::new(150, 100),
            Scv => Cost::new(50, 0),
            Mule => Cost::new(0, 0),
            Marine => Cost::new(50, 0),
            Marauder => Cost::new(100, 25),
            Medivac => Cost::new(100, 100),
            Hatchery => Cost::new(300, 0),
            Extractor => Cost::new(25, 0),
            SpawningPool => Cost::new(200, 0),
            RoachWarren => Cost::new(150, 0),
            Larva => Cost::new(0, 0),
            Drone => Cost::new(50, 0),
            Overlord => Cost::new(100, 0),
            Overseer => Cost::new(50, 50),
            Queen => Cost::new(150, 0),
            Zergling => Cost::new(50, 0),
            Roach => Cost::new(75, 25),
        }
    }

    /// Supply consumed once queued. Zerglings hatch in pairs for one supply.
    pub fn supply_cost(&self) -> u32 {
        use UnitTypeId::*;
        match self {
            Probe | Observer | Scv | Marine | Drone | Zergling => 1,
            Zealot | Stalker | Marauder | Medivac | Queen | Roach => 2,
            Immortal => 4,
            Nexus | Pylon | Assimilator | Gateway | CyberneticsCore | Forge | PhotonCannon
            | TwilightCouncil | RoboticsFacility | CommandCenter | OrbitalCommand
            | SupplyDepot | Refinery | Barracks | BarracksTechLab | BarracksReactor
            | EngineeringBay | Factory | Starport | Mule | Hatchery | Extractor
            | SpawningPool | RoachWarren | Larva | Overlord | Overseer => 0,
        }
    }

    pub fn is_townhall(&self) -> bool {
        matches!(
            self,
            UnitTypeId::Nexus
                | UnitTypeId::CommandCenter
                | UnitTypeId::OrbitalCommand
                | UnitTypeId::Hatchery
        )
    }

    pub fn is_worker(&self) -> bool {
        matches!(self, UnitTypeId::Probe | UnitTypeId::Scv | UnitTypeId::Drone)
    }

    pub fn is_gas_structure(&self) -> bool {
        matches!(
            self,
            UnitTypeId::Assimilator | UnitTypeId::Refinery | UnitTypeId::Extractor
        )
    }

    /// Structure or unit that creates this type. `None` for types that are
    /// placed by a worker, or spawn on their own.
    pub fn producer(&self) -> Option<UnitTypeId> {
        use UnitTypeId::*;
        match self {
            Probe => Some(Nexus),
            Zealot | Stalker => Some(Gateway),
            Immortal | Observer => Some(RoboticsFacility),
            Scv => Some(CommandCenter),
            OrbitalCommand => Some(CommandCenter),
            BarracksTechLab | BarracksReactor => Some(Barracks),
            Marine | Marauder => Some(Barracks),
            Medivac => Some(Starport),
            Mule => Some(OrbitalCommand),
            Drone | Overlord | Zergling | Roach => Some(Larva),
            Overseer => Some(Overlord),
            Queen => Some(Hatchery),
            Nexus | Pylon | Assimilator | Gateway | CyberneticsCore | Forge | PhotonCannon
            | TwilightCouncil | RoboticsFacility | CommandCenter | SupplyDepot | Refinery
            | Barracks | EngineeringBay | Factory | Starport | Hatchery | Extractor
            | SpawningPool | RoachWarren | Larva => None,
        }
    }

    /// Tech structure that must be complete before this type can be queued
    pub fn requirement(&self) -> Option<UnitTypeId> {
        use UnitTypeId::*;
        match self {
            Gateway | Forge => Some(Pylon),
            CyberneticsCore => Some(Gateway),
            PhotonCannon => Some(Forge),
            TwilightCouncil | RoboticsFacility | Stalker => Some(CyberneticsCore),
            Barracks => Some(SupplyDepot),
            OrbitalCommand | EngineeringBay | Factory => Some(Barracks),
            Marauder => Some(BarracksTechLab),
            Starport => Some(Factory),
            Medivac => Some(Starport),
            Queen | Zergling | RoachWarren => Some(SpawningPool),
            Roach => Some(RoachWarren),
            Nexus | Pylon | Assimilator | Probe | Zealot | Immortal | Observer
            | CommandCenter | SupplyDepot | Refinery | BarracksTechLab | BarracksReactor
            | Scv | Mule | Marine | Hatchery | Extractor | SpawningPool | Larva | Drone
            | Overlord | Overseer => None,
        }
    }
}

/// The four roles every race fills with its own types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceUnits {
    pub townhall: UnitTypeId,
    pub worker: UnitTypeId,
    pub supply: UnitTypeId,
    pub gas: UnitTypeId,
}

pub fn race_units(race: Race) -> RaceUnits {
    match race {
        Race::Protoss => RaceUnits {
            townhall: UnitTypeId::Nexus,
            worker: UnitTypeId::Probe,
            supply: UnitTypeId::Pylon,
            gas: UnitTypeId::Assimilator,
        },
        Race::Terran => RaceUnits {
            townhall: UnitTypeId::CommandCenter,
            worker: UnitTypeId::Scv,
            supply: UnitTypeId::SupplyDepot,
            gas: UnitTypeId::Refinery,
        },
        Race::Zerg => RaceUnits {
            townhall: UnitTypeId::Hatchery,
            worker: UnitTypeId::Drone,
            supply: UnitTypeId::Overlord,
            gas: UnitTypeId::Extractor,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_units_match_race() {
        for race in Race::ALL {
            let units = race_units(race);
            assert_eq!(units.townhall.race(), race);
            assert_eq!(units.worker.race(), race);
            assert_eq!(units.supply.race(), race);
            assert_eq!(units.gas.race(), race);
            assert!(units.townhall.is_townhall());
            assert!(units.worker.is_worker());
            assert!(units.gas.is_gas_structure());
        }
    }

    #[test]
    fn test_producer_and_requirement_same_race() {
        use UnitTypeId::*;
        let all = [
            Nexus, Pylon, Assimilator, Gateway, CyberneticsCore, Forge, PhotonCannon,
            TwilightCouncil, RoboticsFacility, Probe, Zealot, Stalker, Immortal, Observer,
            CommandCenter, OrbitalCommand, SupplyDepot, Refinery, Barracks, BarracksTechLab,
            BarracksReactor, EngineeringBay, Factory, Starport, Scv, Mule, Marine, Marauder,
            Medivac, Hatchery, Extractor, SpawningPool, RoachWarren, Larva, Drone, Overlord,
            Overseer, Queen, Zergling, Roach,
        ];
        for t in all {
            if let Some(p) = t.producer() {
                assert_eq!(p.race(), t.race(), "{:?}", t);
            }
            if let Some(r) = t.requirement() {
                assert_eq!(r.race(), t.race(), "{:?}", t);
            }
        }
    }

    #[test]
    fn test_tech_costs_gas() {
        assert_eq!(UnitTypeId::Stalker.cost(), Cost::new(125, 50));
        assert_eq!(UnitTypeId::Zealot.cost().vespene, 0);
        assert!(UnitTypeId::TwilightCouncil.cost().vespene > 0);
    }
}
