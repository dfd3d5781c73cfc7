//! Teams, their rosters and locker rooms.

use crate::models::{
    CategoryId, LockerRoom, LockerRoomId, LockerRoomPatch, NewLockerRoom, NewPlayer, NewTeam, Player,
    PlayerId, PlayerPatch, Team, TeamId, TeamPatch, TournamentId,
};
use crate::store::{required, Entity, Store, StoreError};
use std::collections::BTreeSet;

impl Store {
    pub fn teams_of(&self, tournament_id: TournamentId) -> Vec<&Team> {
        self.teams
            .values()
            .filter(|t| t.tournament_id == tournament_id)
            .collect()
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, StoreError> {
        self.teams.get(id).ok_or(StoreError::NotFound(Entity::Team))
    }

    pub fn team_in(&self, tournament_id: TournamentId, id: TeamId) -> Result<&Team, StoreError> {
        self.teams
            .get(id)
            .filter(|t| t.tournament_id == tournament_id)
            .ok_or(StoreError::NotFound(Entity::Team))
    }

    pub fn teams_of_category(&self, tournament_id: TournamentId, category_id: CategoryId) -> Vec<&Team> {
        self.teams
            .values()
            .filter(|t| t.tournament_id == tournament_id && t.category_id == Some(category_id))
            .collect()
    }

    pub fn create_team(
        &mut self,
        tournament_id: TournamentId,
        new: NewTeam,
    ) -> Result<&Team, StoreError> {
        let name = required(&new.name, "name")?;
        self.tournament(tournament_id)?;
        self.check_category_ref(tournament_id, new.category_id)?;
        Ok(self.teams.insert(|id| Team {
            id,
            name,
            logo: new.logo,
            tournament_id,
            category_id: new.category_id,
            paid: new.paid,
        }))
    }

    pub fn update_team(
        &mut self,
        tournament_id: TournamentId,
        id: TeamId,
        patch: TeamPatch,
    ) -> Result<&Team, StoreError> {
        self.team_in(tournament_id, id)?;
        let name = patch.name.as_deref().map(|n| required(n, "name")).transpose()?;
        self.check_category_ref(tournament_id, patch.category_id)?;
        let team = self
            .teams
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Team))?;
        if let Some(name) = name {
            team.name = name;
        }
        if patch.logo.is_some() {
            team.logo = patch.logo;
        }
        if patch.category_id.is_some() {
            team.category_id = patch.category_id;
        }
        if let Some(paid) = patch.paid {
            team.paid = paid;
        }
        Ok(&*team)
    }

    /// Delete a team with its players, locker rooms, pool memberships and games.
    pub fn delete_team(&mut self, tournament_id: TournamentId, id: TeamId) -> Result<Team, StoreError> {
        let team = self.team_in(tournament_id, id)?.clone();
        self.remove_team_rows(&BTreeSet::from([id]));
        Ok(team)
    }

    pub(super) fn remove_team_rows(&mut self, ids: &BTreeSet<TeamId>) {
        self.players.retain(|p| !ids.contains(&p.team_id));
        self.locker_rooms.retain(|l| !ids.contains(&l.team_id));
        self.pool_teams.retain(|(_, team_id)| !ids.contains(team_id));
        self.games
            .retain(|g| !ids.contains(&g.team1_id) && !ids.contains(&g.team2_id));
        self.teams.retain(|t| !ids.contains(&t.id));
    }

    // --- Players ---

    /// Roster of a team, by shirt number (players without one last).
    pub fn players_of(&self, team_id: TeamId) -> Vec<&Player> {
        let mut players: Vec<&Player> = self
            .players
            .values()
            .filter(|p| p.team_id == team_id)
            .collect();
        players.sort_by_key(|p| (p.number.is_none(), p.number));
        players
    }

    pub fn player_of(&self, team_id: TeamId, id: PlayerId) -> Result<&Player, StoreError> {
        self.players
            .get(id)
            .filter(|p| p.team_id == team_id)
            .ok_or(StoreError::NotFound(Entity::Player))
    }

    pub fn create_player(&mut self, team_id: TeamId, new: NewPlayer) -> Result<&Player, StoreError> {
        let first_name = required(&new.first_name, "first_name")?;
        let last_name = required(&new.last_name, "last_name")?;
        self.team(team_id)?;
        Ok(self.players.insert(|id| Player {
            id,
            first_name,
            last_name,
            number: new.number,
            position: new.position,
            team_id,
        }))
    }

    pub fn update_player(
        &mut self,
        team_id: TeamId,
        id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<&Player, StoreError> {
        self.player_of(team_id, id)?;
        let first_name = patch
            .first_name
            .as_deref()
            .map(|n| required(n, "first_name"))
            .transpose()?;
        let last_name = patch
            .last_name
            .as_deref()
            .map(|n| required(n, "last_name"))
            .transpose()?;
        let player = self
            .players
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Player))?;
        if let Some(first_name) = first_name {
            player.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            player.last_name = last_name;
        }
        if patch.number.is_some() {
            player.number = patch.number;
        }
        if patch.position.is_some() {
            player.position = patch.position;
        }
        Ok(&*player)
    }

    pub fn delete_player(&mut self, team_id: TeamId, id: PlayerId) -> Result<Player, StoreError> {
        self.player_of(team_id, id)?;
        self.players
            .remove(id)
            .ok_or(StoreError::NotFound(Entity::Player))
    }

    // --- Locker rooms ---

    pub fn locker_rooms(&self) -> Vec<&LockerRoom> {
        self.locker_rooms.values().collect()
    }

    pub fn locker_room(&self, id: LockerRoomId) -> Result<&LockerRoom, StoreError> {
        self.locker_rooms
            .get(id)
            .ok_or(StoreError::NotFound(Entity::LockerRoom))
    }

    pub fn locker_rooms_of(&self, team_id: TeamId) -> Vec<&LockerRoom> {
        self.locker_rooms
            .values()
            .filter(|l| l.team_id == team_id)
            .collect()
    }

    fn check_team_ref(&self, team_id: TeamId) -> Result<(), StoreError> {
        if self.teams.contains(team_id) {
            Ok(())
        } else {
            Err(StoreError::InvalidReference(Entity::Team))
        }
    }

    pub fn create_locker_room(&mut self, new: NewLockerRoom) -> Result<&LockerRoom, StoreError> {
        self.check_team_ref(new.team_id)?;
        Ok(self.locker_rooms.insert(|id| LockerRoom {
            id,
            number: new.number,
            team_id: new.team_id,
        }))
    }

    pub fn update_locker_room(
        &mut self,
        id: LockerRoomId,
        patch: LockerRoomPatch,
    ) -> Result<&LockerRoom, StoreError> {
        self.locker_room(id)?;
        if let Some(team_id) = patch.team_id {
            self.check_team_ref(team_id)?;
        }
        let room = self
            .locker_rooms
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::LockerRoom))?;
        if let Some(number) = patch.number {
            room.number = number;
        }
        if let Some(team_id) = patch.team_id {
            room.team_id = team_id;
        }
        Ok(&*room)
    }

    pub fn delete_locker_room(&mut self, id: LockerRoomId) -> Result<LockerRoom, StoreError> {
        self.locker_rooms
            .remove(id)
            .ok_or(StoreError::NotFound(Entity::LockerRoom))
    }
}
