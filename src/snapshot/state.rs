//! Read-only game state supplied fresh every tick
//!
//! The collaborator owns the snapshot for the duration of a tick; the
//! controllers only ever borrow it immutably.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityId, Cost, UnitTypeId, UpgradeId};
use crate::core::types::{Point2, Tag};
use crate::snapshot::unit::{ResourceNode, UnitView};

/// Distance within which an expansion location counts as taken
pub const CLAIMED_BASE_RADIUS: f32 = 6.0;
/// Distance within which a gas structure sits on a geyser
const GEYSER_OCCUPIED_RADIUS: f32 = 1.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub game_loop: u64,
    #[serde(default)]
    pub minerals: u32,
    #[serde(default)]
    pub vespene: u32,
    #[serde(default)]
    pub supply_used: u32,
    #[serde(default)]
    pub supply_cap: u32,
    pub start_location: Point2,
    /// Owned units and structures
    #[serde(default)]
    pub units: Vec<UnitView>,
    /// Queued production not yet visible as a unit: type -> count
    #[serde(default)]
    pub pending: AHashMap<UnitTypeId, u32>,
    #[serde(default)]
    pub upgrades_researched: AHashSet<UpgradeId>,
    #[serde(default)]
    pub upgrades_pending: AHashSet<UpgradeId>,
    #[serde(default)]
    pub mineral_fields: Vec<ResourceNode>,
    #[serde(default)]
    pub vespene_geysers: Vec<ResourceNode>,
    #[serde(default)]
    pub expansion_locations: Vec<Point2>,
    #[serde(default)]
    pub enemy_start_locations: Vec<Point2>,
}

impl StateSnapshot {
    pub fn new(start_location: Point2) -> Self {
        Self {
            start_location,
            ..Self::default()
        }
    }

    // === Queries ===

    /// All owned units of a type, finished or not
    pub fn units_of(&self, type_id: UnitTypeId) -> impl Iterator<Item = &UnitView> + '_ {
        self.units.iter().filter(move |u| u.type_id == type_id)
    }

    /// Finished units of a type
    pub fn ready_of(&self, type_id: UnitTypeId) -> impl Iterator<Item = &UnitView> + '_ {
        self.units_of(type_id).filter(|u| u.is_ready())
    }

    /// Finished units of a type with no queued orders
    pub fn idle_ready_of(&self, type_id: UnitTypeId) -> impl Iterator<Item = &UnitView> + '_ {
        self.ready_of(type_id).filter(|u| u.is_idle())
    }

    pub fn count(&self, type_id: UnitTypeId) -> usize {
        self.units_of(type_id).count()
    }

    /// Idle finished units able to make `product`, per the catalogue
    pub fn idle_producers(&self, product: UnitTypeId) -> impl Iterator<Item = &UnitView> + '_ {
        product
            .producer()
            .into_iter()
            .flat_map(move |producer| self.idle_ready_of(producer))
    }

    /// Finished casters of `ability` holding enough energy to use it
    pub fn casters(&self, ability: AbilityId) -> impl Iterator<Item = &UnitView> + '_ {
        let energy = ability.energy_cost();
        self.ready_of(ability.caster())
            .filter(move |u| u.energy >= energy)
    }

    pub fn exists(&self, type_id: UnitTypeId) -> bool {
        self.units_of(type_id).next().is_some()
    }

    pub fn ready_exists(&self, type_id: UnitTypeId) -> bool {
        self.ready_of(type_id).next().is_some()
    }

    /// Queued plus under construction
    pub fn pending_count(&self, type_id: UnitTypeId) -> usize {
        let queued = self.pending.get(&type_id).copied().unwrap_or(0) as usize;
        queued + self.units_of(type_id).filter(|u| !u.is_ready()).count()
    }

    pub fn is_pending(&self, type_id: UnitTypeId) -> bool {
        self.pending_count(type_id) > 0
    }

    pub fn townhalls(&self) -> impl Iterator<Item = &UnitView> + '_ {
        self.units.iter().filter(|u| u.type_id.is_townhall())
    }

    pub fn ready_townhalls(&self) -> impl Iterator<Item = &UnitView> + '_ {
        self.townhalls().filter(|u| u.is_ready())
    }

    /// Base count, including townhalls still under construction
    pub fn townhall_count(&self) -> usize {
        self.townhalls().count()
    }

    /// The townhall closest to the start location
    pub fn main_base(&self) -> Option<&UnitView> {
        closest(self.townhalls(), self.start_location)
    }

    pub fn workers(&self) -> impl Iterator<Item = &UnitView> + '_ {
        self.units.iter().filter(|u| u.type_id.is_worker())
    }

    /// Workers alive plus workers queued
    pub fn worker_count(&self, worker: UnitTypeId) -> usize {
        self.count(worker) + self.pending.get(&worker).copied().unwrap_or(0) as usize
    }

    pub fn supply_left(&self) -> u32 {
        self.supply_cap.saturating_sub(self.supply_used)
    }

    pub fn can_afford_cost(&self, cost: Cost) -> bool {
        self.minerals >= cost.minerals && self.vespene >= cost.vespene
    }

    /// Resources and supply are both available
    pub fn can_afford(&self, type_id: UnitTypeId) -> bool {
        self.can_afford_cost(type_id.cost()) && self.supply_left() >= type_id.supply_cost()
    }

    pub fn can_afford_upgrade(&self, upgrade: UpgradeId) -> bool {
        self.can_afford_cost(upgrade.cost())
    }

    pub fn is_researched_or_pending(&self, upgrade: UpgradeId) -> bool {
        self.upgrades_researched.contains(&upgrade) || self.upgrades_pending.contains(&upgrade)
    }

    /// A type's tech prerequisite is complete (or it has none)
    pub fn requirement_met(&self, type_id: UnitTypeId) -> bool {
        type_id
            .requirement()
            .map_or(true, |required| self.ready_exists(required))
    }

    /// Geysers within `radius` of `point` with no gas structure on them
    pub fn free_geysers_near(&self, point: Point2, radius: f32) -> Vec<&ResourceNode> {
        self.vespene_geysers
            .iter()
            .filter(|g| g.position.distance(&point) < radius)
            .filter(|g| {
                !self.units.iter().any(|u| {
                    u.type_id.is_gas_structure()
                        && u.position.distance(&g.position) < GEYSER_OCCUPIED_RADIUS
                })
            })
            .collect()
    }

    /// Worker closest to `point` not in `busy`, ties broken by lowest tag
    pub fn build_worker_for(&self, point: Point2, busy: &[Tag]) -> Option<&UnitView> {
        closest(self.workers().filter(|w| !busy.contains(&w.tag)), point)
    }

    pub fn mineral_fields_near(&self, point: Point2, radius: f32) -> impl Iterator<Item = &ResourceNode> + '_ {
        self.mineral_fields
            .iter()
            .filter(move |m| m.position.distance(&point) < radius)
    }

    /// Expansion location closest to the start location without an own townhall
    pub fn nearest_free_expansion(&self) -> Option<Point2> {
        self.expansion_locations
            .iter()
            .filter(|loc| {
                !self
                    .townhalls()
                    .any(|t| t.position.distance(loc) < CLAIMED_BASE_RADIUS)
            })
            .min_by(|a, b| {
                a.distance(&self.start_location)
                    .total_cmp(&b.distance(&self.start_location))
            })
            .copied()
    }

    /// The first known enemy start location
    pub fn enemy_start(&self) -> Option<Point2> {
        self.enemy_start_locations.first().copied()
    }

    // === Construction ===

    /// Tag one above the highest tag in use
    pub fn fresh_tag(&self) -> Tag {
        let highest = self
            .units
            .iter()
            .map(|u| u.tag.0)
            .chain(self.mineral_fields.iter().map(|m| m.tag.0))
            .chain(self.vespene_geysers.iter().map(|g| g.tag.0))
            .max()
            .unwrap_or(0);
        Tag(highest + 1)
    }

    pub fn with_resources(mut self, minerals: u32, vespene: u32) -> Self {
        self.minerals = minerals;
        self.vespene = vespene;
        self
    }

    pub fn with_supply(mut self, used: u32, cap: u32) -> Self {
        self.supply_used = used;
        self.supply_cap = cap;
        self
    }

    pub fn with_unit(mut self, unit: UnitView) -> Self {
        self.units.push(unit);
        self
    }

    /// Add a finished unit with a fresh tag
    pub fn with(self, type_id: UnitTypeId, position: Point2) -> Self {
        let tag = self.fresh_tag();
        self.with_unit(UnitView::new(tag, type_id, position))
    }

    /// Add `n` finished units at the same position
    pub fn with_n(mut self, type_id: UnitTypeId, n: usize, position: Point2) -> Self {
        for _ in 0..n {
            self = self.with(type_id, position);
        }
        self
    }

    pub fn with_pending(mut self, type_id: UnitTypeId, count: u32) -> Self {
        *self.pending.entry(type_id).or_insert(0) += count;
        self
    }

    pub fn with_geyser(mut self, position: Point2) -> Self {
        let tag = self.fresh_tag();
        self.vespene_geysers.push(ResourceNode { tag, position, contents: 2250 });
        self
    }

    pub fn with_mineral_field(mut self, position: Point2, contents: u32) -> Self {
        let tag = self.fresh_tag();
        self.mineral_fields.push(ResourceNode { tag, position, contents });
        self
    }

    pub fn with_expansion(mut self, position: Point2) -> Self {
        self.expansion_locations.push(position);
        self
    }

    pub fn with_enemy_start(mut self, position: Point2) -> Self {
        self.enemy_start_locations.push(position);
        self
    }

    pub fn with_researched(mut self, upgrade: UpgradeId) -> Self {
        self.upgrades_researched.insert(upgrade);
        self
    }

    pub fn with_researching(mut self, upgrade: UpgradeId) -> Self {
        self.upgrades_pending.insert(upgrade);
        self
    }
}

/// Closest unit to `point`, ties broken by lowest tag
pub fn closest<'a, I>(units: I, point: Point2) -> Option<&'a UnitView>
where
    I: IntoIterator<Item = &'a UnitView>,
{
    units.into_iter().min_by(|a, b| {
        a.position
            .distance(&point)
            .total_cmp(&b.position.distance(&point))
            .then(a.tag.cmp(&b.tag))
    })
}
