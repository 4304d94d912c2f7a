//! Recorded snapshots in, recorded batches out

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::command::CommandBatch;
use crate::core::error::Result;
use crate::core::types::Iteration;
use crate::driver::{CommandSink, SnapshotProvider};
use crate::snapshot::StateSnapshot;

/// One recorded step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub iteration: Iteration,
    pub snapshot: StateSnapshot,
}

impl ReplayFrame {
    pub fn new(iteration: Iteration, snapshot: StateSnapshot) -> Self {
        Self { iteration, snapshot }
    }
}

/// Plays back a JSON array of frames in file order
#[derive(Debug, Clone, Default)]
pub struct ReplayProvider {
    frames: VecDeque<ReplayFrame>,
}

impl ReplayProvider {
    pub fn from_frames(frames: Vec<ReplayFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let frames: Vec<ReplayFrame> = serde_json::from_str(contents)?;
        Ok(Self::from_frames(frames))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let provider = Self::from_json_str(&contents)?;
        tracing::info!("Loaded {} frames from {}", provider.remaining(), path.display());
        Ok(provider)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl SnapshotProvider for ReplayProvider {
    fn next_snapshot(&mut self) -> Option<(Iteration, StateSnapshot)> {
        self.frames.pop_front().map(|f| (f.iteration, f.snapshot))
    }
}

/// Keeps every submitted batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingSink {
    pub batches: Vec<CommandBatch>,
}

impl RecordingSink {
    pub fn total_commands(&self) -> usize {
        self.batches.iter().map(CommandBatch::len).sum()
    }
}

impl CommandSink for RecordingSink {
    fn submit(&mut self, batch: &CommandBatch) {
        self.batches.push(batch.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitTypeId;

    #[test]
    fn test_frames_in_file_order() {
        let json = r#"[
            {"iteration": 3, "snapshot": {"start_location": {"x": 1.0, "y": 1.0}, "minerals": 75}},
            {"iteration": 4, "snapshot": {"start_location": {"x": 1.0, "y": 1.0},
                "units": [{"tag": 1, "type_id": "Hatchery", "position": {"x": 1.0, "y": 1.0}}]}}
        ]"#;
        let mut provider = ReplayProvider::from_json_str(json).unwrap();
        assert_eq!(provider.remaining(), 2);

        let (iteration, first) = provider.next_snapshot().unwrap();
        assert_eq!(iteration, 3);
        assert_eq!(first.minerals, 75);

        let (_, second) = provider.next_snapshot().unwrap();
        assert_eq!(second.count(UnitTypeId::Hatchery), 1);
        assert!(provider.next_snapshot().is_none());
    }

    #[test]
    fn test_malformed_replay_is_error() {
        assert!(ReplayProvider::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_recording_sink_totals() {
        let mut sink = RecordingSink::default();
        let mut batch = CommandBatch::new(0);
        batch.push(crate::command::Command::train(
            crate::core::types::Tag(1),
            UnitTypeId::Drone,
        ));
        sink.submit(&batch);
        sink.submit(&CommandBatch::new(1));
        assert_eq!(sink.batches.len(), 2);
        assert_eq!(sink.total_commands(), 1);
    }
}
