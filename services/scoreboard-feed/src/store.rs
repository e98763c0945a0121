//! Contest data access
//!
//! The `ContestDataSource` trait is the seam between the broadcast engine
//! and the registration layer that owns contest, class, problem, and
//! contender CRUD. The engine only ever reads typed records through it.
//!
//! `InMemoryContestStore` is the in-process implementation standing in for
//! that collaborator: it validates and applies tick mutations and hands the
//! publisher a consistent view of one contender's tick set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use types::contender::Contender;
use types::contest::{CompClass, Contest};
use types::errors::ScoreboardError;
use types::ids::{CompClassId, ContenderId, ContestId, ProblemId, TickId};
use types::problem::Problem;
use types::tick::Tick;

/// Read access to the contest records the engine consumes.
pub trait ContestDataSource: Send + Sync {
    fn contest(&self, id: ContestId) -> Option<Contest>;
    fn contender(&self, id: ContenderId) -> Option<Contender>;
    fn comp_classes_for_contest(&self, id: ContestId) -> Vec<CompClass>;
    fn contenders_for_contest(&self, id: ContestId) -> Vec<Contender>;
    fn problems_for_contest(&self, id: ContestId) -> HashMap<ProblemId, Problem>;
    /// A contender's full tick set in registration order.
    fn ticks_for_contender(&self, id: ContenderId) -> Vec<Tick>;
}

/// Seed payload for bootstrapping a contest into the in-memory store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub contest: Contest,
    pub comp_classes: Vec<CompClass>,
    pub problems: Vec<Problem>,
    pub contenders: Vec<Contender>,
}

/// In-memory contest store.
///
/// Sharded maps keep tick mutations for different contenders from
/// contending with each other.
pub struct InMemoryContestStore {
    contests: DashMap<ContestId, Contest>,
    comp_classes: DashMap<CompClassId, CompClass>,
    contenders: DashMap<ContenderId, Contender>,
    problems: DashMap<ProblemId, Problem>,
    ticks: DashMap<TickId, Tick>,
    next_tick_id: AtomicU32,
}

impl InMemoryContestStore {
    pub fn new() -> Self {
        Self {
            contests: DashMap::new(),
            comp_classes: DashMap::new(),
            contenders: DashMap::new(),
            problems: DashMap::new(),
            ticks: DashMap::new(),
            next_tick_id: AtomicU32::new(1),
        }
    }

    /// Load a full seed payload, validating referential integrity.
    pub fn load(&self, seed: SeedData) -> Result<(), ScoreboardError> {
        self.insert_contest(seed.contest)?;
        for comp_class in seed.comp_classes {
            self.insert_comp_class(comp_class)?;
        }
        for problem in seed.problems {
            self.insert_problem(problem)?;
        }
        for contender in seed.contenders {
            self.insert_contender(contender)?;
        }
        Ok(())
    }

    pub fn insert_contest(&self, contest: Contest) -> Result<(), ScoreboardError> {
        contest.validate()?;
        self.contests.insert(contest.id, contest);
        Ok(())
    }

    pub fn insert_comp_class(&self, comp_class: CompClass) -> Result<(), ScoreboardError> {
        if !self.contests.contains_key(&comp_class.contest_id) {
            return Err(ScoreboardError::ContestNotFound(comp_class.contest_id));
        }
        self.comp_classes.insert(comp_class.id, comp_class);
        Ok(())
    }

    pub fn insert_problem(&self, problem: Problem) -> Result<(), ScoreboardError> {
        if !self.contests.contains_key(&problem.contest_id) {
            return Err(ScoreboardError::ContestNotFound(problem.contest_id));
        }
        self.problems.insert(problem.id, problem);
        Ok(())
    }

    pub fn insert_contender(&self, contender: Contender) -> Result<(), ScoreboardError> {
        if !self.contests.contains_key(&contender.contest_id) {
            return Err(ScoreboardError::ContestNotFound(contender.contest_id));
        }
        if !self.comp_classes.contains_key(&contender.comp_class_id) {
            return Err(ScoreboardError::CompClassNotFound(contender.comp_class_id));
        }
        self.contenders.insert(contender.id, contender);
        Ok(())
    }

    /// Record a new ascent. One tick per problem per contender.
    pub fn create_tick(
        &self,
        contender_id: ContenderId,
        problem_id: ProblemId,
        is_flash: bool,
    ) -> Result<Tick, ScoreboardError> {
        let contender = self
            .contenders
            .get(&contender_id)
            .map(|entry| entry.value().clone())
            .ok_or(ScoreboardError::ContenderNotFound(contender_id))?;
        let problem = self
            .problems
            .get(&problem_id)
            .map(|entry| entry.value().clone())
            .ok_or(ScoreboardError::ProblemNotFound(problem_id))?;

        if problem.contest_id != contender.contest_id {
            return Err(ScoreboardError::CrossContestTick {
                problem: problem_id,
                contest: contender.contest_id,
            });
        }
        let duplicate = self
            .ticks
            .iter()
            .any(|t| t.contender_id == contender_id && t.problem_id == problem_id);
        if duplicate {
            return Err(ScoreboardError::DuplicateTick {
                contender: contender_id,
                problem: problem_id,
            });
        }

        let id = TickId::new(self.next_tick_id.fetch_add(1, Ordering::Relaxed));
        let tick = Tick {
            id,
            contender_id,
            problem_id,
            timestamp: Utc::now(),
            is_flash,
        };
        self.ticks.insert(id, tick.clone());
        Ok(tick)
    }

    pub fn update_tick(&self, id: TickId, is_flash: bool) -> Result<Tick, ScoreboardError> {
        let mut entry = self
            .ticks
            .get_mut(&id)
            .ok_or(ScoreboardError::TickNotFound(id))?;
        entry.is_flash = is_flash;
        Ok(entry.value().clone())
    }

    pub fn delete_tick(&self, id: TickId) -> Result<Tick, ScoreboardError> {
        self.ticks
            .remove(&id)
            .map(|(_, tick)| tick)
            .ok_or(ScoreboardError::TickNotFound(id))
    }
}

impl Default for InMemoryContestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContestDataSource for InMemoryContestStore {
    fn contest(&self, id: ContestId) -> Option<Contest> {
        self.contests.get(&id).map(|entry| entry.value().clone())
    }

    fn contender(&self, id: ContenderId) -> Option<Contender> {
        self.contenders.get(&id).map(|entry| entry.value().clone())
    }

    fn comp_classes_for_contest(&self, id: ContestId) -> Vec<CompClass> {
        let mut classes: Vec<CompClass> = self
            .comp_classes
            .iter()
            .filter(|entry| entry.contest_id == id)
            .map(|entry| entry.value().clone())
            .collect();
        classes.sort_by_key(|c| c.id);
        classes
    }

    fn contenders_for_contest(&self, id: ContestId) -> Vec<Contender> {
        let mut contenders: Vec<Contender> = self
            .contenders
            .iter()
            .filter(|entry| entry.contest_id == id)
            .map(|entry| entry.value().clone())
            .collect();
        contenders.sort_by_key(|c| c.id);
        contenders
    }

    fn problems_for_contest(&self, id: ContestId) -> HashMap<ProblemId, Problem> {
        self.problems
            .iter()
            .filter(|entry| entry.contest_id == id)
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    fn ticks_for_contender(&self, id: ContenderId) -> Vec<Tick> {
        let mut ticks: Vec<Tick> = self
            .ticks
            .iter()
            .filter(|entry| entry.contender_id == id)
            .map(|entry| entry.value().clone())
            .collect();
        // Tick ids are issued monotonically, so this is registration order.
        ticks.sort_by_key(|t| t.id);
        ticks
    }
}
