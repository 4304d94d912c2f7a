//! Commands the controllers emit towards the command sink
//!
//! Delivery is fire-and-forget: the sink may drop a command (for example
//! because it is no longer affordable) without reporting back.

pub mod batch;
pub mod order;

pub use batch::CommandBatch;
pub use order::{CastTarget, Command};
