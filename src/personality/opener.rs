//! Opener catalogue and the (race, personality) lookup

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Race;
use crate::personality::Personality;

/// Early-game deviation plan, fixed for the whole match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opener {
    // Protoss
    GateExpand,
    NexusFirst,
    FourGate,
    CannonRush,
    // Terran
    RaxExpand,
    CcFirst,
    ThreeRax,
    ProxyRax,
    // Zerg
    HatchFirst,
    PoolFirst,
    TwelvePool,
}

impl Opener {
    /// Stable identifier used in logs and match plans
    pub fn id(&self) -> &'static str {
        match self {
            Opener::GateExpand => "GATE_EXPAND",
            Opener::NexusFirst => "NEXUS_FIRST",
            Opener::FourGate => "4_GATE",
            Opener::CannonRush => "CANNON_RUSH",
            Opener::RaxExpand => "RAX_EXPAND",
            Opener::CcFirst => "CC_FIRST",
            Opener::ThreeRax => "3_RAX",
            Opener::ProxyRax => "PROXY_RAX",
            Opener::HatchFirst => "HATCH_FIRST",
            Opener::PoolFirst => "POOL_FIRST",
            Opener::TwelvePool => "12_POOL",
        }
    }

    pub fn race(&self) -> Race {
        match self {
            Opener::GateExpand | Opener::NexusFirst | Opener::FourGate | Opener::CannonRush => {
                Race::Protoss
            }
            Opener::RaxExpand | Opener::CcFirst | Opener::ThreeRax | Opener::ProxyRax => {
                Race::Terran
            }
            Opener::HatchFirst | Opener::PoolFirst | Opener::TwelvePool => Race::Zerg,
        }
    }

    /// Army size that commits to an attack before personality adjustment
    pub fn base_attack_threshold(&self) -> u32 {
        match self {
            Opener::GateExpand | Opener::NexusFirst => 16,
            Opener::FourGate => 9,
            Opener::CannonRush => 8,
            Opener::RaxExpand | Opener::CcFirst => 16,
            Opener::ThreeRax => 12,
            Opener::ProxyRax => 7,
            Opener::HatchFirst => 30,
            Opener::PoolFirst => 19,
            Opener::TwelvePool => 10,
        }
    }

    /// The race's default opener
    pub fn standard_for(race: Race) -> Opener {
        resolve(race, Personality::Standard)
    }
}

impl fmt::Display for Opener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Total lookup of the opener for a race and personality
pub fn resolve(race: Race, personality: Personality) -> Opener {
    match (race, personality) {
        (Race::Protoss, Personality::Standard) => Opener::GateExpand,
        (Race::Protoss, Personality::Economic) => Opener::NexusFirst,
        (Race::Protoss, Personality::Aggressive) => Opener::FourGate,
        (Race::Protoss, Personality::Cheese) => Opener::CannonRush,
        (Race::Terran, Personality::Standard) => Opener::RaxExpand,
        (Race::Terran, Personality::Economic) => Opener::CcFirst,
        (Race::Terran, Personality::Aggressive) => Opener::ThreeRax,
        (Race::Terran, Personality::Cheese) => Opener::ProxyRax,
        (Race::Zerg, Personality::Standard) => Opener::HatchFirst,
        (Race::Zerg, Personality::Economic) => Opener::HatchFirst,
        (Race::Zerg, Personality::Aggressive) => Opener::PoolFirst,
        (Race::Zerg, Personality::Cheese) => Opener::TwelvePool,
    }
}

/// Lookup by personality name; unknown names resolve to the standard opener
pub fn resolve_named(race: Race, personality: &str) -> Opener {
    match Personality::parse(personality) {
        Some(p) => resolve(race, p),
        None => Opener::standard_for(race),
    }
}
