//! The controller's read-only view of the game
//!
//! Built by the external collaborator each step; see `StateSnapshot`.

pub mod state;
pub mod unit;

pub use state::{closest, StateSnapshot, CLAIMED_BASE_RADIUS};
pub use unit::{ResourceNode, UnitView};
