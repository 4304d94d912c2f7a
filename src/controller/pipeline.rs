//! Shared controller state and the rule blocks every race runs the same way

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{race_units, RaceUnits, UnitTypeId, UpgradeId};
use crate::command::{Command, CommandBatch};
use crate::controller::attack::attack_threshold;
use crate::core::config::BotSettings;
use crate::core::types::{Point2, Race, Tag};
use crate::personality::{resolve, Opener, Personality};
use crate::skill::SkillProfile;
use crate::snapshot::{StateSnapshot, UnitView};

/// Upper bound on the supply cap; no supply structures beyond it
pub const MAX_SUPPLY: u32 = 200;
/// Minerals banked before a standard expansion
pub const EXPANSION_MINERALS: u32 = 400;
/// Standard expansions stop at this many bases
pub const MAX_BASES: usize = 4;
/// Geysers further than this from a ready townhall are ignored
pub const GAS_RADIUS: f32 = 15.0;

/// Rule blocks, evaluated in `RuleBlock::ORDER` on every acting tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleBlock {
    Supply,
    Opener,
    Workers,
    Expansion,
    Gas,
    Structures,
    TechTier,
    Research,
    Energy,
    Army,
    Attack,
}

impl RuleBlock {
    pub const ORDER: [RuleBlock; 11] = [
        RuleBlock::Supply,
        RuleBlock::Opener,
        RuleBlock::Workers,
        RuleBlock::Expansion,
        RuleBlock::Gas,
        RuleBlock::Structures,
        RuleBlock::TechTier,
        RuleBlock::Research,
        RuleBlock::Energy,
        RuleBlock::Army,
        RuleBlock::Attack,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleBlock::Supply => "supply",
            RuleBlock::Opener => "opener",
            RuleBlock::Workers => "workers",
            RuleBlock::Expansion => "expansion",
            RuleBlock::Gas => "gas",
            RuleBlock::Structures => "structures",
            RuleBlock::TechTier => "tech",
            RuleBlock::Research => "research",
            RuleBlock::Energy => "energy",
            RuleBlock::Army => "army",
            RuleBlock::Attack => "attack",
        }
    }
}

/// State every race controller carries for the length of a match
#[derive(Debug, Clone)]
pub struct ControllerCore {
    race: Race,
    settings: BotSettings,
    skill: SkillProfile,
    opener: Opener,
    rng: ChaCha8Rng,
    /// One-shot: set once the opener's deviation is visible in a snapshot
    opener_done: bool,
    terminated: bool,
}

impl ControllerCore {
    /// Match start: derive the skill profile and resolve the opener
    pub fn new(race: Race, settings: BotSettings, seed: u64) -> Self {
        let skill = SkillProfile::derive(settings.rating);
        let opener = resolve(race, settings.personality);

        tracing::info!(
            "{} controller ready. Rating: {} ({}), Style: {}, Opener: {}",
            race,
            skill.rating.value(),
            skill.tier,
            settings.personality.name(),
            opener
        );
        tracing::info!(
            "Error rate: {:.1}%, action delay: {} steps",
            skill.error_rate * 100.0,
            skill.action_delay
        );

        Self {
            race,
            settings,
            skill,
            opener,
            rng: ChaCha8Rng::seed_from_u64(seed),
            opener_done: false,
            terminated: false,
        }
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn units(&self) -> RaceUnits {
        race_units(self.race)
    }

    pub fn personality(&self) -> Personality {
        self.settings.personality
    }

    pub fn skill(&self) -> &SkillProfile {
        &self.skill
    }

    pub fn opener(&self) -> Opener {
        self.opener
    }

    pub fn opener_done(&self) -> bool {
        self.opener_done
    }

    pub fn mark_opener_done(&mut self) {
        if !self.opener_done {
            tracing::debug!("Opener {} complete", self.opener);
            self.opener_done = true;
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Roll the skill profile's mistake chance
    pub fn makes_mistake(&mut self) -> bool {
        self.skill.should_make_mistake(&mut self.rng)
    }

    pub fn attack_threshold(&self) -> u32 {
        attack_threshold(self.opener, self.settings.personality)
    }

    /// Worker target: lower under the Cheese personality
    pub fn worker_cap(&self) -> usize {
        match (self.race, self.settings.personality) {
            (Race::Zerg, Personality::Cheese) => 25,
            (Race::Zerg, _) => 80,
            (_, Personality::Cheese) => 20,
            (_, _) => 70,
        }
    }

    /// A uniformly chosen larva, if any exist
    pub fn random_larva<'a>(&mut self, snapshot: &'a StateSnapshot) -> Option<&'a UnitView> {
        let larvae: Vec<&UnitView> = snapshot.units_of(UnitTypeId::Larva).collect();
        larvae.choose(&mut self.rng).copied()
    }
}

// === Shared blocks ===

/// Supply is about to run out and nothing is already on the way.
///
/// The mistake roll comes last so it is only spent when the rule would fire.
pub fn supply_needed(core: &mut ControllerCore, snapshot: &StateSnapshot, threshold: u32) -> bool {
    let supply = core.units().supply;
    snapshot.supply_left() < threshold
        && snapshot.supply_cap < MAX_SUPPLY
        && snapshot.can_afford(supply)
        && !snapshot.is_pending(supply)
        && !core.makes_mistake()
}

/// Train one worker from each idle ready townhall
pub fn train_workers(core: &mut ControllerCore, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
    let worker = core.units().worker;
    let producers: Vec<Tag> = snapshot
        .ready_townhalls()
        .filter(|t| t.is_idle())
        .map(|t| t.tag)
        .collect();

    for producer in producers {
        if snapshot.worker_count(worker) >= core.worker_cap() || !snapshot.can_afford(worker) {
            return;
        }
        if core.makes_mistake() {
            continue;
        }
        batch.push(Command::train(producer, worker));
    }
}

/// Expansion command towards the nearest unclaimed base location
pub fn expand_now(snapshot: &StateSnapshot, townhall: UnitTypeId) -> Option<Command> {
    snapshot
        .nearest_free_expansion()
        .map(|location| Command::Expand { townhall, location })
}

/// Standard expansion once enough minerals are banked
pub fn standard_expansion(core: &ControllerCore, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
    let townhall = core.units().townhall;
    let bases = snapshot.townhall_count();
    if snapshot.minerals > EXPANSION_MINERALS
        && bases < MAX_BASES
        && !snapshot.is_pending(townhall)
    {
        if let Some(command) = expand_now(snapshot, townhall) {
            tracing::debug!("Expanding to base {}", bases + 1);
            batch.push(command);
        }
    }
}

/// Take every free geyser next to a ready townhall, one worker per geyser
pub fn take_gas(core: &ControllerCore, snapshot: &StateSnapshot, batch: &mut CommandBatch) {
    let structure = core.units().gas;
    let mut assigned: Vec<Tag> = Vec::new();

    for townhall in snapshot.ready_townhalls() {
        for geyser in snapshot.free_geysers_near(townhall.position, GAS_RADIUS) {
            if !snapshot.can_afford(structure) {
                return;
            }
            let Some(worker) = snapshot.build_worker_for(geyser.position, &assigned) else {
                return;
            };
            assigned.push(worker.tag);
            batch.push(Command::BuildGas {
                worker: worker.tag,
                geyser: geyser.tag,
                structure,
            });
        }
    }
}

/// Queue upgrades in priority order, each on an idle ready structure of
/// the type that researches it.
///
/// Each structure takes at most one upgrade per tick; upgrades already
/// researched or in progress are skipped.
pub fn research_in_order(snapshot: &StateSnapshot, batch: &mut CommandBatch, upgrades: &[UpgradeId]) {
    let mut busy: Vec<Tag> = Vec::new();

    for &upgrade in upgrades {
        if snapshot.is_researched_or_pending(upgrade) || !snapshot.can_afford_upgrade(upgrade) {
            continue;
        }
        let producer = snapshot
            .idle_ready_of(upgrade.researched_from())
            .find(|p| !busy.contains(&p.tag));
        if let Some(producer) = producer {
            busy.push(producer.tag);
            batch.push(Command::Research {
                producer: producer.tag,
                upgrade,
            });
        }
    }
}

/// Build `structure` near `near` when it does not exist yet
pub fn build_once(
    snapshot: &StateSnapshot,
    batch: &mut CommandBatch,
    structure: UnitTypeId,
    near: Point2,
) -> bool {
    if snapshot.exists(structure) || snapshot.is_pending(structure) {
        return false;
    }
    if !snapshot.can_afford(structure) || !snapshot.requirement_met(structure) {
        return false;
    }
    batch.push(Command::build(structure, near));
    true
}
