//! Persistence gateway: relational tables kept in process, with auto-increment ids.
//!
//! Each table maps an id to a record. Join-style queries (teams of a pool, games of a
//! category, ...) live next to the entity they return.

mod games;
mod people;
mod structure;
mod teams;

pub use games::{PoolSnapshot, Slot, Snapshot};

use crate::models::{
    Account, Category, Game, LockerRoom, Phase, Player, Pool, PoolId, Referee, Team, TeamId,
    Tournament,
};
use std::collections::{BTreeMap, BTreeSet};

/// Kinds of records, used in error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entity {
    Tournament,
    Phase,
    Category,
    Pool,
    PoolMembership,
    Team,
    Player,
    Game,
    Referee,
    LockerRoom,
    Account,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Entity::Tournament => "Tournament",
            Entity::Phase => "Phase",
            Entity::Category => "Category",
            Entity::Pool => "Pool",
            Entity::PoolMembership => "Pool-team association",
            Entity::Team => "Team",
            Entity::Player => "Player",
            Entity::Game => "Game",
            Entity::Referee => "Referee",
            Entity::LockerRoom => "Locker room",
            Entity::Account => "Account",
        };
        f.write_str(name)
    }
}

/// Errors returned by store operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// The addressed record does not exist (or not in the addressed tournament).
    NotFound(Entity),
    /// A record referenced from a request body does not exist in this tournament.
    InvalidReference(Entity),
    /// A required field is missing or blank.
    Required(&'static str),
    /// The request is well-formed but cannot be applied.
    Rejected(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(entity) => write!(f, "{} not found", entity),
            StoreError::InvalidReference(entity) => {
                write!(f, "{} not found in this tournament", entity)
            }
            StoreError::Required(field) => write!(f, "{} is required", field),
            StoreError::Rejected(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for StoreError {}

/// Require a non-blank string; returns it trimmed.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// One table: rows by id, ids allocated in increasing order and never reused.
#[derive(Clone, Debug)]
pub struct Table<T> {
    rows: BTreeMap<u64, T>,
    last_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    /// Allocate the next id and store the row built from it.
    pub fn insert(&mut self, make: impl FnOnce(u64) -> T) -> &T {
        self.last_id += 1;
        let id = self.last_id;
        self.rows.entry(id).or_insert(make(id))
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Rows in id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.values_mut()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All tables of the application.
#[derive(Clone, Debug, Default)]
pub struct Store {
    tournaments: Table<Tournament>,
    phases: Table<Phase>,
    categories: Table<Category>,
    pools: Table<Pool>,
    /// Pool membership: (pool, team).
    pool_teams: BTreeSet<(PoolId, TeamId)>,
    teams: Table<Team>,
    players: Table<Player>,
    games: Table<Game>,
    referees: Table<Referee>,
    locker_rooms: Table<LockerRoom>,
    accounts: Table<Account>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
