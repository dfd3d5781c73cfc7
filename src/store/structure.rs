//! Tournaments, phases, categories, pools and pool membership.

use crate::models::{
    Category, CategoryId, CategoryPatch, NewCategory, NewPhase, NewPool, NewTournament, Phase,
    PhaseId, PhasePatch, Pool, PoolId, PoolPatch, Team, TeamId, Tournament, TournamentId,
    TournamentPatch,
};
use crate::models::{PointConfig, DEFAULT_BREAK_TIME, DEFAULT_GAME_DURATION};
use crate::store::{required, Entity, Store, StoreError};
use std::collections::BTreeSet;

impl Store {
    // --- Tournaments ---

    pub fn tournaments(&self) -> Vec<&Tournament> {
        self.tournaments.values().collect()
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, StoreError> {
        self.tournaments
            .get(id)
            .ok_or(StoreError::NotFound(Entity::Tournament))
    }

    pub fn create_tournament(&mut self, new: NewTournament) -> Result<&Tournament, StoreError> {
        let name = required(&new.name, "name")?;
        let location = required(&new.location, "location")?;
        let defaults = PointConfig::default();
        Ok(self.tournaments.insert(|id| Tournament {
            id,
            name,
            description: new.description,
            start_date: new.start_date,
            location,
            break_time: new.break_time.unwrap_or(DEFAULT_BREAK_TIME),
            points_win: new.points_win.unwrap_or(defaults.win),
            points_draw: new.points_draw.unwrap_or(defaults.draw),
            points_loss: new.points_loss.unwrap_or(defaults.loss),
            account_id: new.account_id,
        }))
    }

    pub fn update_tournament(
        &mut self,
        id: TournamentId,
        patch: TournamentPatch,
    ) -> Result<&Tournament, StoreError> {
        let name = patch.name.as_deref().map(|n| required(n, "name")).transpose()?;
        let location = patch
            .location
            .as_deref()
            .map(|l| required(l, "location"))
            .transpose()?;
        let t = self
            .tournaments
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Tournament))?;
        if let Some(name) = name {
            t.name = name;
        }
        if let Some(location) = location {
            t.location = location;
        }
        if patch.description.is_some() {
            t.description = patch.description;
        }
        if let Some(start_date) = patch.start_date {
            t.start_date = start_date;
        }
        if let Some(break_time) = patch.break_time {
            t.break_time = break_time;
        }
        if let Some(win) = patch.points_win {
            t.points_win = win;
        }
        if let Some(draw) = patch.points_draw {
            t.points_draw = draw;
        }
        if let Some(loss) = patch.points_loss {
            t.points_loss = loss;
        }
        Ok(&*t)
    }

    /// Delete a tournament and everything it owns.
    pub fn delete_tournament(&mut self, id: TournamentId) -> Result<Tournament, StoreError> {
        let tournament = self
            .tournaments
            .remove(id)
            .ok_or(StoreError::NotFound(Entity::Tournament))?;
        let phase_ids: BTreeSet<PhaseId> = self
            .phases
            .values()
            .filter(|p| p.tournament_id == id)
            .map(|p| p.id)
            .collect();
        for phase_id in phase_ids {
            self.remove_phase_rows(phase_id);
        }
        self.categories.retain(|c| c.tournament_id != id);
        let team_ids: BTreeSet<TeamId> = self
            .teams
            .values()
            .filter(|t| t.tournament_id == id)
            .map(|t| t.id)
            .collect();
        self.remove_team_rows(&team_ids);
        self.games.retain(|g| g.tournament_id != id);
        self.referees.retain(|r| r.tournament_id != id);
        Ok(tournament)
    }

    /// Counts shown next to a tournament on a referee's dashboard.
    pub fn tournament_counts(&self, id: TournamentId) -> (usize, usize, usize) {
        let teams = self.teams.values().filter(|t| t.tournament_id == id).count();
        let pools = self.pools_of(id).len();
        let games = self.games.values().filter(|g| g.tournament_id == id).count();
        (teams, pools, games)
    }

    // --- Phases ---

    pub fn phases_of(&self, tournament_id: TournamentId) -> Vec<&Phase> {
        self.phases
            .values()
            .filter(|p| p.tournament_id == tournament_id)
            .collect()
    }

    pub fn phase(&self, id: PhaseId) -> Result<&Phase, StoreError> {
        self.phases.get(id).ok_or(StoreError::NotFound(Entity::Phase))
    }

    pub fn create_phase(
        &mut self,
        tournament_id: TournamentId,
        new: NewPhase,
    ) -> Result<&Phase, StoreError> {
        let name = required(&new.name, "name")?;
        self.tournament(tournament_id)?;
        Ok(self.phases.insert(|id| Phase {
            id,
            name,
            tournament_id,
        }))
    }

    pub fn update_phase(&mut self, id: PhaseId, patch: PhasePatch) -> Result<&Phase, StoreError> {
        let name = patch.name.as_deref().map(|n| required(n, "name")).transpose()?;
        let phase = self
            .phases
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Phase))?;
        if let Some(name) = name {
            phase.name = name;
        }
        Ok(&*phase)
    }

    pub fn delete_phase(&mut self, id: PhaseId) -> Result<Phase, StoreError> {
        if !self.phases.contains(id) {
            return Err(StoreError::NotFound(Entity::Phase));
        }
        self.remove_phase_rows(id)
            .ok_or(StoreError::NotFound(Entity::Phase))
    }

    pub fn pools_of_phase(&self, phase_id: PhaseId) -> Vec<&Pool> {
        self.pools
            .values()
            .filter(|p| p.phase_id == phase_id)
            .collect()
    }

    fn remove_phase_rows(&mut self, phase_id: PhaseId) -> Option<Phase> {
        let pool_ids: Vec<PoolId> = self.pools_of_phase(phase_id).iter().map(|p| p.id).collect();
        for pool_id in pool_ids {
            self.remove_pool_rows(pool_id);
        }
        self.phases.remove(phase_id)
    }

    // --- Categories ---

    pub fn categories_of(&self, tournament_id: TournamentId) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|c| c.tournament_id == tournament_id)
            .collect()
    }

    pub fn category_in(
        &self,
        tournament_id: TournamentId,
        id: CategoryId,
    ) -> Result<&Category, StoreError> {
        self.categories
            .get(id)
            .filter(|c| c.tournament_id == tournament_id)
            .ok_or(StoreError::NotFound(Entity::Category))
    }

    /// Check a category referenced from a request body.
    pub(crate) fn check_category_ref(
        &self,
        tournament_id: TournamentId,
        id: Option<CategoryId>,
    ) -> Result<(), StoreError> {
        match id {
            Some(id) => self
                .category_in(tournament_id, id)
                .map(|_| ())
                .map_err(|_| StoreError::InvalidReference(Entity::Category)),
            None => Ok(()),
        }
    }

    pub fn create_category(
        &mut self,
        tournament_id: TournamentId,
        new: NewCategory,
    ) -> Result<&Category, StoreError> {
        let name = required(&new.name, "name")?;
        self.tournament(tournament_id)?;
        Ok(self.categories.insert(|id| Category {
            id,
            name,
            age_min: new.age_min,
            age_max: new.age_max,
            description: new.description,
            game_duration: new.game_duration.unwrap_or(DEFAULT_GAME_DURATION),
            tournament_id,
        }))
    }

    pub fn update_category(
        &mut self,
        tournament_id: TournamentId,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<&Category, StoreError> {
        let name = patch.name.as_deref().map(|n| required(n, "name")).transpose()?;
        self.category_in(tournament_id, id)?;
        let category = self
            .categories
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Category))?;
        if let Some(name) = name {
            category.name = name;
        }
        if patch.age_min.is_some() {
            category.age_min = patch.age_min;
        }
        if patch.age_max.is_some() {
            category.age_max = patch.age_max;
        }
        if patch.description.is_some() {
            category.description = patch.description;
        }
        if let Some(duration) = patch.game_duration {
            category.game_duration = duration;
        }
        Ok(&*category)
    }

    /// Delete a category. Pools and teams in it become uncategorised.
    pub fn delete_category(
        &mut self,
        tournament_id: TournamentId,
        id: CategoryId,
    ) -> Result<Category, StoreError> {
        self.category_in(tournament_id, id)?;
        for pool in self.pools.values_mut() {
            if pool.category_id == Some(id) {
                pool.category_id = None;
            }
        }
        for team in self.teams.values_mut() {
            if team.category_id == Some(id) {
                team.category_id = None;
            }
        }
        self.categories
            .remove(id)
            .ok_or(StoreError::NotFound(Entity::Category))
    }

    pub fn pools_of_category(&self, tournament_id: TournamentId, id: CategoryId) -> Vec<&Pool> {
        self.pools_of(tournament_id)
            .into_iter()
            .filter(|p| p.category_id == Some(id))
            .collect()
    }

    // --- Pools ---

    /// Tournament a pool belongs to, through its phase.
    pub fn pool_tournament(&self, pool: &Pool) -> Option<TournamentId> {
        self.phases.get(pool.phase_id).map(|ph| ph.tournament_id)
    }

    pub fn pools_of(&self, tournament_id: TournamentId) -> Vec<&Pool> {
        self.pools
            .values()
            .filter(|p| self.pool_tournament(p) == Some(tournament_id))
            .collect()
    }

    pub fn pool(&self, id: PoolId) -> Result<&Pool, StoreError> {
        self.pools.get(id).ok_or(StoreError::NotFound(Entity::Pool))
    }

    pub fn pool_in(&self, tournament_id: TournamentId, id: PoolId) -> Result<&Pool, StoreError> {
        self.pools
            .get(id)
            .filter(|p| self.pool_tournament(p) == Some(tournament_id))
            .ok_or(StoreError::NotFound(Entity::Pool))
    }

    /// Phase and category names of a pool, for pool listings and standings headers.
    pub fn pool_labels(&self, pool: &Pool) -> (Option<String>, Option<String>) {
        let phase = self.phases.get(pool.phase_id).map(|p| p.name.clone());
        let category = pool
            .category_id
            .and_then(|id| self.categories.get(id))
            .map(|c| c.name.clone());
        (phase, category)
    }

    fn check_phase_ref(&self, tournament_id: TournamentId, id: PhaseId) -> Result<(), StoreError> {
        match self.phases.get(id) {
            Some(phase) if phase.tournament_id == tournament_id => Ok(()),
            _ => Err(StoreError::InvalidReference(Entity::Phase)),
        }
    }

    pub fn create_pool(
        &mut self,
        tournament_id: TournamentId,
        new: NewPool,
    ) -> Result<&Pool, StoreError> {
        let name = required(&new.name, "name")?;
        self.check_phase_ref(tournament_id, new.phase_id)?;
        self.check_category_ref(tournament_id, new.category_id)?;
        Ok(self.pools.insert(|id| Pool {
            id,
            name,
            phase_id: new.phase_id,
            category_id: new.category_id,
        }))
    }

    pub fn update_pool(
        &mut self,
        tournament_id: TournamentId,
        id: PoolId,
        patch: PoolPatch,
    ) -> Result<&Pool, StoreError> {
        self.pool_in(tournament_id, id)?;
        let name = patch.name.as_deref().map(|n| required(n, "name")).transpose()?;
        if let Some(phase_id) = patch.phase_id {
            self.check_phase_ref(tournament_id, phase_id)?;
        }
        self.check_category_ref(tournament_id, patch.category_id)?;
        let pool = self
            .pools
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Pool))?;
        if let Some(name) = name {
            pool.name = name;
        }
        if let Some(phase_id) = patch.phase_id {
            pool.phase_id = phase_id;
        }
        if patch.category_id.is_some() {
            pool.category_id = patch.category_id;
        }
        Ok(&*pool)
    }

    pub fn delete_pool(&mut self, tournament_id: TournamentId, id: PoolId) -> Result<Pool, StoreError> {
        self.pool_in(tournament_id, id)?;
        self.remove_pool_rows(id)
            .ok_or(StoreError::NotFound(Entity::Pool))
    }

    fn remove_pool_rows(&mut self, pool_id: PoolId) -> Option<Pool> {
        self.pool_teams.retain(|&(p, _)| p != pool_id);
        self.games.retain(|g| g.pool_id != pool_id);
        self.pools.remove(pool_id)
    }

    // --- Pool membership ---

    /// Teams of a pool that belong to the given tournament, in id order.
    pub fn teams_in_pool(&self, tournament_id: TournamentId, pool_id: PoolId) -> Vec<&Team> {
        self.pool_teams
            .iter()
            .filter(|&&(p, _)| p == pool_id)
            .filter_map(|&(_, team_id)| self.teams.get(team_id))
            .filter(|t| t.tournament_id == tournament_id)
            .collect()
    }

    pub fn add_team_to_pool(
        &mut self,
        tournament_id: TournamentId,
        pool_id: PoolId,
        team_id: TeamId,
    ) -> Result<(), StoreError> {
        self.pool_in(tournament_id, pool_id)?;
        self.team_in(tournament_id, team_id)
            .map_err(|_| StoreError::InvalidReference(Entity::Team))?;
        if !self.pool_teams.insert((pool_id, team_id)) {
            return Err(StoreError::Rejected("Team is already in this pool".to_string()));
        }
        Ok(())
    }

    pub fn remove_team_from_pool(
        &mut self,
        tournament_id: TournamentId,
        pool_id: PoolId,
        team_id: TeamId,
    ) -> Result<(), StoreError> {
        self.pool_in(tournament_id, pool_id)?;
        self.team_in(tournament_id, team_id)
            .map_err(|_| StoreError::InvalidReference(Entity::Team))?;
        if !self.pool_teams.remove(&(pool_id, team_id)) {
            return Err(StoreError::NotFound(Entity::PoolMembership));
        }
        Ok(())
    }
}
