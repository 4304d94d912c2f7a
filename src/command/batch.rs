//! Per-tick ordered command list

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityId, UnitTypeId};
use crate::command::order::Command;
use crate::core::types::Iteration;

/// Commands decided in one tick, in emission order.
///
/// Batches are independent: nothing carries over to the next tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandBatch {
    pub issued_at: Iteration,
    pub commands: Vec<Command>,
}

impl CommandBatch {
    pub fn new(issued_at: Iteration) -> Self {
        Self {
            issued_at,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Number of commands that create `type_id`
    pub fn count_producing(&self, type_id: UnitTypeId) -> usize {
        self.iter().filter(|c| c.produces() == Some(type_id)).count()
    }

    pub fn attack_orders(&self) -> usize {
        self.iter()
            .filter(|c| matches!(c, Command::Attack { .. }))
            .count()
    }

    pub fn casts(&self, ability: AbilityId) -> usize {
        self.iter()
            .filter(|c| matches!(c, Command::Cast { ability: a, .. } if *a == ability))
            .count()
    }
}

impl Extend<Command> for CommandBatch {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CommandBatch {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
