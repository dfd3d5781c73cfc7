//! Phases, categories and pools: how a tournament is split into groups of teams.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

pub type PhaseId = u64;
pub type CategoryId = u64;
pub type PoolId = u64;

pub const DEFAULT_GAME_DURATION: u32 = 10;

/// A named stage of a tournament (e.g. group stage).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    pub tournament_id: TournamentId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPhase {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PhasePatch {
    pub name: Option<String>,
}

/// Age category (U10, U12, ...). Drives game duration on the schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub description: Option<String>,
    /// Minutes per game.
    pub game_duration: u32,
    pub tournament_id: TournamentId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub description: Option<String>,
    pub game_duration: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub description: Option<String>,
    pub game_duration: Option<u32>,
}

/// A group of teams within a phase playing each other in a round-robin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
    pub phase_id: PhaseId,
    pub category_id: Option<CategoryId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPool {
    #[serde(default)]
    pub name: String,
    pub phase_id: PhaseId,
    pub category_id: Option<CategoryId>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PoolPatch {
    pub name: Option<String>,
    pub phase_id: Option<PhaseId>,
    pub category_id: Option<CategoryId>,
}
