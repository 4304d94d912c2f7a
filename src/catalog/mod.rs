//! Typed catalogue of units, structures, research and abilities

pub mod ids;
pub mod unit_type;

pub use ids::{AbilityId, BuffId, UpgradeId};
pub use unit_type::{race_units, Cost, RaceUnits, UnitTypeId};
