//! How many production structures each opener wants at a given base count

use crate::personality::Opener;

/// Desired count of the race's main production structure.
///
/// Gateways for Protoss, Barracks for Terran, Spawning Pool for Zerg.
/// Monotone non-decreasing in `bases`.
pub fn desired_production(opener: Opener, bases: usize) -> usize {
    match opener {
        Opener::FourGate => 4,
        Opener::GateExpand | Opener::NexusFirst | Opener::CannonRush => 2 * bases + 1,
        Opener::ThreeRax | Opener::ProxyRax => 3 + 2 * bases.saturating_sub(1),
        Opener::RaxExpand | Opener::CcFirst => 2 + 2 * bases.saturating_sub(1),
        Opener::HatchFirst => usize::from(bases >= 2),
        Opener::PoolFirst | Opener::TwelvePool => 1,
    }
}
