//! Per-unit view inside a snapshot

use serde::{Deserialize, Serialize};

use crate::catalog::{BuffId, UnitTypeId};
use crate::core::types::{Point2, Tag};

fn complete() -> f32 {
    1.0
}

/// One owned unit or structure as the collaborator reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub tag: Tag,
    pub type_id: UnitTypeId,
    pub position: Point2,
    /// 1.0 once finished
    #[serde(default = "complete")]
    pub build_progress: f32,
    /// Queued orders (training, research, movement)
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub energy: f32,
    #[serde(default)]
    pub buffs: Vec<BuffId>,
    /// Attached add-on structure type, Terran production only
    #[serde(default)]
    pub addon: Option<UnitTypeId>,
}

impl UnitView {
    pub fn new(tag: Tag, type_id: UnitTypeId, position: Point2) -> Self {
        Self {
            tag,
            type_id,
            position,
            build_progress: 1.0,
            order_count: 0,
            energy: 0.0,
            buffs: Vec::new(),
            addon: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.build_progress >= 1.0
    }

    pub fn is_idle(&self) -> bool {
        self.order_count == 0
    }

    pub fn has_buff(&self, buff: BuffId) -> bool {
        self.buffs.contains(&buff)
    }

    pub fn under_construction(mut self, progress: f32) -> Self {
        self.build_progress = progress.clamp(0.0, 0.99);
        self
    }

    pub fn with_orders(mut self, order_count: u32) -> Self {
        self.order_count = order_count;
        self
    }

    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_buff(mut self, buff: BuffId) -> Self {
        self.buffs.push(buff);
        self
    }

    pub fn with_addon(mut self, addon: UnitTypeId) -> Self {
        self.addon = Some(addon);
        self
    }
}

/// Mineral field or vespene geyser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub tag: Tag,
    pub position: Point2,
    /// Remaining minerals or gas
    #[serde(default)]
    pub contents: u32,
}
