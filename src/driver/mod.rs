//! Per-step driver loop
//!
//! Each step: snapshot -> worker distribution -> controller tick -> sink

pub mod replay;

pub use replay::{RecordingSink, ReplayFrame, ReplayProvider};

use serde::{Deserialize, Serialize};

use crate::command::CommandBatch;
use crate::controller::RaceController;
use crate::core::types::Iteration;
use crate::snapshot::StateSnapshot;

/// Source of game state, one snapshot per step
pub trait SnapshotProvider {
    /// `None` once the match is over
    fn next_snapshot(&mut self) -> Option<(Iteration, StateSnapshot)>;
}

/// Destination for emitted commands
pub trait CommandSink {
    fn submit(&mut self, batch: &CommandBatch);
}

/// Worker saturation is handled outside the controllers
pub trait WorkerDistributor {
    fn distribute(&mut self, snapshot: &StateSnapshot);
}

/// Distributor that leaves workers where they are
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleDistributor;

impl WorkerDistributor for IdleDistributor {
    fn distribute(&mut self, _snapshot: &StateSnapshot) {}
}

/// Totals for one driven match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub ticks: u64,
    /// Ticks that produced at least one command
    pub active_ticks: u64,
    pub commands: usize,
}

pub struct TickDriver {
    controller: Box<dyn RaceController>,
    distributor: Box<dyn WorkerDistributor>,
}

impl TickDriver {
    pub fn new(controller: Box<dyn RaceController>) -> Self {
        Self {
            controller,
            distributor: Box::new(IdleDistributor),
        }
    }

    pub fn with_distributor(mut self, distributor: Box<dyn WorkerDistributor>) -> Self {
        self.distributor = distributor;
        self
    }

    pub fn controller(&self) -> &dyn RaceController {
        self.controller.as_ref()
    }

    /// Run a single step and hand the batch to the sink
    pub fn step(
        &mut self,
        iteration: Iteration,
        snapshot: &StateSnapshot,
        sink: &mut dyn CommandSink,
    ) -> CommandBatch {
        self.distributor.distribute(snapshot);
        let batch = self.controller.on_tick(iteration, snapshot);
        sink.submit(&batch);
        batch
    }

    /// Drive the controller until the provider runs dry, then end the match
    pub fn run(
        &mut self,
        provider: &mut dyn SnapshotProvider,
        sink: &mut dyn CommandSink,
    ) -> DriverSummary {
        let mut summary = DriverSummary::default();

        while let Some((iteration, snapshot)) = provider.next_snapshot() {
            let batch = self.step(iteration, &snapshot, sink);
            summary.ticks += 1;
            if !batch.is_empty() {
                summary.active_ticks += 1;
                summary.commands += batch.len();
            }
        }

        self.controller.on_match_end();
        tracing::info!(
            "Match over after {} ticks: {} commands on {} ticks",
            summary.ticks,
            summary.commands,
            summary.active_ticks
        );
        summary
    }
}
