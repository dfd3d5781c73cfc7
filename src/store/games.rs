//! Games, plus the snapshots the standings views are computed from.

use crate::models::{
    CategoryId, Game, GameId, GamePatch, NewGame, PointConfig, Pool, PoolId, RefereeId, Team,
    TeamId, TournamentId, DEFAULT_GAME_DURATION,
};
use crate::store::{Entity, Store, StoreError};
use chrono::NaiveDateTime;

/// Owned copy of everything one standings table needs.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
    pub points: PointConfig,
}

/// One pool of the tournament overview.
#[derive(Clone, Debug)]
pub struct PoolSnapshot {
    pub pool: Pool,
    pub phase_name: Option<String>,
    pub category_name: Option<String>,
    pub snapshot: Snapshot,
}

/// A game waiting for a time slot, with the length of its category's games.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slot {
    pub game_id: GameId,
    pub category_id: CategoryId,
    pub pool_id: PoolId,
    pub game_duration: u32,
}

fn owned<T: Clone>(rows: Vec<&T>) -> Vec<T> {
    rows.into_iter().cloned().collect()
}

impl Store {
    pub fn games(&self) -> Vec<&Game> {
        self.games.values().collect()
    }

    pub fn game(&self, id: GameId) -> Result<&Game, StoreError> {
        self.games.get(id).ok_or(StoreError::NotFound(Entity::Game))
    }

    pub fn games_of_pool(&self, pool_id: PoolId) -> Result<Vec<&Game>, StoreError> {
        self.pool(pool_id)?;
        Ok(self.games.values().filter(|g| g.pool_id == pool_id).collect())
    }

    pub fn games_of_tournament(&self, tournament_id: TournamentId) -> Vec<&Game> {
        self.games
            .values()
            .filter(|g| g.tournament_id == tournament_id)
            .collect()
    }

    pub fn games_of_team(&self, team_id: TeamId) -> Vec<&Game> {
        self.games.values().filter(|g| g.involves(team_id)).collect()
    }

    pub fn games_of_referee(&self, referee_id: RefereeId) -> Vec<&Game> {
        self.games
            .values()
            .filter(|g| g.referee_id == Some(referee_id))
            .collect()
    }

    /// Games played in pools of the given category.
    pub fn games_of_category(&self, tournament_id: TournamentId, category_id: CategoryId) -> Vec<&Game> {
        self.games
            .values()
            .filter(|g| g.tournament_id == tournament_id)
            .filter(|g| {
                self.pools
                    .get(g.pool_id)
                    .is_some_and(|p| p.category_id == Some(category_id))
            })
            .collect()
    }

    /// Check the teams and referee of a game against the tournament of its pool.
    fn check_game_refs(
        &self,
        tournament_id: TournamentId,
        team1_id: TeamId,
        team2_id: TeamId,
        referee_id: Option<RefereeId>,
    ) -> Result<(), StoreError> {
        for team_id in [team1_id, team2_id] {
            self.team_in(tournament_id, team_id)
                .map_err(|_| StoreError::InvalidReference(Entity::Team))?;
        }
        if team1_id == team2_id {
            return Err(StoreError::Rejected(
                "A team cannot play against itself".to_string(),
            ));
        }
        if let Some(referee_id) = referee_id {
            match self.referees.get(referee_id) {
                Some(r) if r.tournament_id == tournament_id => {}
                _ => return Err(StoreError::InvalidReference(Entity::Referee)),
            }
        }
        Ok(())
    }

    fn tournament_of_pool_ref(&self, pool_id: PoolId) -> Result<TournamentId, StoreError> {
        self.pools
            .get(pool_id)
            .and_then(|p| self.pool_tournament(p))
            .ok_or(StoreError::InvalidReference(Entity::Pool))
    }

    /// Create a game. Its tournament is the tournament of its pool.
    pub fn create_game(&mut self, new: NewGame) -> Result<&Game, StoreError> {
        let tournament_id = self.tournament_of_pool_ref(new.pool_id)?;
        self.check_game_refs(tournament_id, new.team1_id, new.team2_id, new.referee_id)?;
        Ok(self.games.insert(|id| Game {
            id,
            start_time: new.start_time,
            team1_id: new.team1_id,
            team2_id: new.team2_id,
            team1_score: new.team1_score,
            team2_score: new.team2_score,
            is_completed: new.is_completed,
            referee_id: new.referee_id,
            pool_id: new.pool_id,
            tournament_id,
        }))
    }

    pub fn update_game(&mut self, id: GameId, patch: GamePatch) -> Result<&Game, StoreError> {
        let current = self.game(id)?;
        let pool_id = patch.pool_id.unwrap_or(current.pool_id);
        let team1_id = patch.team1_id.unwrap_or(current.team1_id);
        let team2_id = patch.team2_id.unwrap_or(current.team2_id);
        let referee_id = patch.referee_id.or(current.referee_id);
        let tournament_id = self.tournament_of_pool_ref(pool_id)?;
        self.check_game_refs(tournament_id, team1_id, team2_id, referee_id)?;

        let game = self
            .games
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Game))?;
        game.pool_id = pool_id;
        game.tournament_id = tournament_id;
        game.team1_id = team1_id;
        game.team2_id = team2_id;
        game.referee_id = referee_id;
        if patch.start_time.is_some() {
            game.start_time = patch.start_time;
        }
        if patch.team1_score.is_some() {
            game.team1_score = patch.team1_score;
        }
        if patch.team2_score.is_some() {
            game.team2_score = patch.team2_score;
        }
        if let Some(done) = patch.is_completed {
            game.is_completed = done;
        }
        Ok(&*game)
    }

    pub fn delete_game(&mut self, id: GameId) -> Result<Game, StoreError> {
        self.games.remove(id).ok_or(StoreError::NotFound(Entity::Game))
    }

    /// Games of a tournament that can be scheduled: those whose pool has a category,
    /// ordered by category, pool, then game. A zero game duration counts as the default.
    pub fn schedule_slots(&self, tournament_id: TournamentId) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self
            .games_of_tournament(tournament_id)
            .into_iter()
            .filter_map(|g| {
                let pool = self.pools.get(g.pool_id)?;
                let category = self.categories.get(pool.category_id?)?;
                Some(Slot {
                    game_id: g.id,
                    category_id: category.id,
                    pool_id: pool.id,
                    game_duration: match category.game_duration {
                        0 => DEFAULT_GAME_DURATION,
                        minutes => minutes,
                    },
                })
            })
            .collect();
        slots.sort_by_key(|s| (s.category_id, s.pool_id, s.game_id));
        slots
    }

    pub fn set_start_time(&mut self, id: GameId, start: NaiveDateTime) -> Result<(), StoreError> {
        let game = self
            .games
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Game))?;
        game.start_time = Some(start);
        Ok(())
    }

    // --- Standings snapshots ---

    pub fn pool_snapshot(&self, tournament_id: TournamentId, pool_id: PoolId) -> Result<Snapshot, StoreError> {
        let points = self.tournament(tournament_id)?.point_config();
        self.pool_in(tournament_id, pool_id)?;
        Ok(Snapshot {
            teams: owned(self.teams_in_pool(tournament_id, pool_id)),
            games: owned(self.games_of_pool(pool_id)?),
            points,
        })
    }

    pub fn category_snapshot(
        &self,
        tournament_id: TournamentId,
        category_id: CategoryId,
    ) -> Result<Snapshot, StoreError> {
        let points = self.tournament(tournament_id)?.point_config();
        self.category_in(tournament_id, category_id)?;
        Ok(Snapshot {
            teams: owned(self.teams_of_category(tournament_id, category_id)),
            games: owned(self.games_of_category(tournament_id, category_id)),
            points,
        })
    }

    pub fn tournament_snapshot(&self, tournament_id: TournamentId) -> Result<Snapshot, StoreError> {
        let points = self.tournament(tournament_id)?.point_config();
        Ok(Snapshot {
            teams: owned(self.teams_of(tournament_id)),
            games: owned(self.games_of_tournament(tournament_id)),
            points,
        })
    }

    /// One snapshot per pool of the tournament, in pool id order.
    pub fn all_pool_snapshots(&self, tournament_id: TournamentId) -> Result<Vec<PoolSnapshot>, StoreError> {
        let points = self.tournament(tournament_id)?.point_config();
        let mut blocks = Vec::new();
        for pool in self.pools_of(tournament_id) {
            let (phase_name, category_name) = self.pool_labels(pool);
            blocks.push(PoolSnapshot {
                pool: pool.clone(),
                phase_name,
                category_name,
                snapshot: Snapshot {
                    teams: owned(self.teams_in_pool(tournament_id, pool.id)),
                    games: owned(self.games_of_pool(pool.id)?),
                    points,
                },
            });
        }
        Ok(blocks)
    }
}
