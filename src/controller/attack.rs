//! Massing / committed attack decision
//!
//! Level-triggered with no hysteresis: every tick the army is at or above
//! the threshold, every qualifying unit is ordered to attack again. There is
//! no retreat transition; an army that drops below the threshold simply
//! goes back to massing on the next acting tick.

use serde::{Deserialize, Serialize};

use crate::catalog::UnitTypeId;
use crate::command::{Command, CommandBatch};
use crate::core::types::Point2;
use crate::personality::{Opener, Personality};
use crate::snapshot::StateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    Massing,
    Committed,
}

impl AttackPhase {
    pub fn evaluate(army_size: usize, threshold: u32) -> Self {
        if army_size >= threshold as usize {
            AttackPhase::Committed
        } else {
            AttackPhase::Massing
        }
    }
}

/// `max(1, base(opener) * pct(personality) / 100)`
pub fn attack_threshold(opener: Opener, personality: Personality) -> u32 {
    (opener.base_attack_threshold() * personality.attack_threshold_percent() / 100).max(1)
}

/// Unit composition that counts towards the threshold, and the units that
/// trail behind it
#[derive(Debug, Clone, Copy)]
pub struct ArmyComposition {
    pub army: &'static [UnitTypeId],
    pub support: &'static [UnitTypeId],
}

/// Issue attack orders when the army is large enough.
///
/// Attackers target the first known enemy start location; support units
/// move to the army's centroid.
pub fn dispatch_attack(
    snapshot: &StateSnapshot,
    batch: &mut CommandBatch,
    composition: ArmyComposition,
    threshold: u32,
) -> AttackPhase {
    let army: Vec<_> = snapshot
        .units
        .iter()
        .filter(|u| composition.army.contains(&u.type_id))
        .collect();

    let phase = AttackPhase::evaluate(army.len(), threshold);
    if phase == AttackPhase::Massing {
        return phase;
    }

    let Some(target) = snapshot.enemy_start() else {
        return phase;
    };

    tracing::debug!(
        "Attack committed: {} units (threshold {}) towards ({:.1}, {:.1})",
        army.len(),
        threshold,
        target.x,
        target.y
    );

    for unit in &army {
        batch.push(Command::attack(unit.tag, target));
    }

    if let Some(centroid) = Point2::centroid(army.iter().map(|u| u.position)) {
        for support in snapshot
            .units
            .iter()
            .filter(|u| composition.support.contains(&u.type_id))
        {
            batch.push(Command::move_to(support.tag, centroid));
        }
    }

    phase
}
