//! Individual commands a controller can issue

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityId, UnitTypeId, UpgradeId};
use crate::core::types::{Point2, Tag};

/// What an ability is cast on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CastTarget {
    Unit(Tag),
    Point(Point2),
}

/// One fire-and-forget instruction for the command sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Place a structure near a point; the sink picks the builder and spot
    Build { structure: UnitTypeId, near: Point2 },
    /// Send a specific worker to build on a geyser
    BuildGas {
        worker: Tag,
        geyser: Tag,
        structure: UnitTypeId,
    },
    /// Start a townhall on a free base location
    Expand { townhall: UnitTypeId, location: Point2 },
    Train { producer: Tag, unit: UnitTypeId },
    /// Transform a unit in place (Command Center into Orbital Command)
    Morph { unit: Tag, into: UnitTypeId },
    BuildAddon { producer: Tag, addon: UnitTypeId },
    Research { producer: Tag, upgrade: UpgradeId },
    Cast {
        caster: Tag,
        ability: AbilityId,
        target: CastTarget,
    },
    Attack { unit: Tag, target: Point2 },
    Move { unit: Tag, target: Point2 },
}

impl Command {
    /// Convenience: build near a point
    pub fn build(structure: UnitTypeId, near: Point2) -> Self {
        Command::Build { structure, near }
    }

    /// Convenience: train from a producer
    pub fn train(producer: Tag, unit: UnitTypeId) -> Self {
        Command::Train { producer, unit }
    }

    /// Convenience: cast on a unit
    pub fn cast_on(caster: Tag, ability: AbilityId, target: Tag) -> Self {
        Command::Cast {
            caster,
            ability,
            target: CastTarget::Unit(target),
        }
    }

    /// Convenience: attack-move
    pub fn attack(unit: Tag, target: Point2) -> Self {
        Command::Attack { unit, target }
    }

    /// Convenience: plain move
    pub fn move_to(unit: Tag, target: Point2) -> Self {
        Command::Move { unit, target }
    }

    /// The unit type this command creates, if any
    pub fn produces(&self) -> Option<UnitTypeId> {
        match self {
            Command::Build { structure, .. } | Command::BuildGas { structure, .. } => {
                Some(*structure)
            }
            Command::Expand { townhall, .. } => Some(*townhall),
            Command::Train { unit, .. } => Some(*unit),
            Command::Morph { into, .. } => Some(*into),
            Command::BuildAddon { addon, .. } => Some(*addon),
            Command::Research { .. }
            | Command::Cast { .. }
            | Command::Attack { .. }
            | Command::Move { .. } => None,
        }
    }
}
