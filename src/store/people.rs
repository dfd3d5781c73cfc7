//! Referees and administrator accounts.

use crate::models::{Account, AccountId, NewReferee, Referee, RefereeId, RefereePatch, TournamentId};
use crate::store::{required, Entity, Store, StoreError};
use uuid::Uuid;

impl Store {
    pub fn referees(&self) -> Vec<&Referee> {
        self.referees.values().collect()
    }

    pub fn referees_of(&self, tournament_id: TournamentId) -> Vec<&Referee> {
        self.referees
            .values()
            .filter(|r| r.tournament_id == tournament_id)
            .collect()
    }

    pub fn referee(&self, id: RefereeId) -> Result<&Referee, StoreError> {
        self.referees
            .get(id)
            .ok_or(StoreError::NotFound(Entity::Referee))
    }

    pub fn referee_by_uuid(&self, uuid: Uuid) -> Result<&Referee, StoreError> {
        self.referees
            .values()
            .find(|r| r.login_uuid == uuid)
            .ok_or(StoreError::NotFound(Entity::Referee))
    }

    /// First referee (lowest id) with this last name.
    pub fn referee_by_last_name(&self, last_name: &str) -> Option<&Referee> {
        self.referees.values().find(|r| r.last_name == last_name)
    }

    fn check_tournament_ref(&self, tournament_id: TournamentId) -> Result<(), StoreError> {
        self.tournament(tournament_id)
            .map(|_| ())
            .map_err(|_| StoreError::InvalidReference(Entity::Tournament))
    }

    /// Create a referee with a fresh login UUID. `password_hash` is stored as given.
    pub fn create_referee(
        &mut self,
        new: NewReferee,
        password_hash: Option<String>,
    ) -> Result<&Referee, StoreError> {
        let last_name = required(&new.last_name, "last_name")?;
        let first_name = required(&new.first_name, "first_name")?;
        self.check_tournament_ref(new.tournament_id)?;
        Ok(self.referees.insert(|id| Referee {
            id,
            last_name,
            first_name,
            login_uuid: Uuid::new_v4(),
            password_hash,
            tournament_id: new.tournament_id,
        }))
    }

    pub fn update_referee(&mut self, id: RefereeId, patch: RefereePatch) -> Result<&Referee, StoreError> {
        self.referee(id)?;
        let last_name = patch
            .last_name
            .as_deref()
            .map(|n| required(n, "last_name"))
            .transpose()?;
        let first_name = patch
            .first_name
            .as_deref()
            .map(|n| required(n, "first_name"))
            .transpose()?;
        if let Some(tournament_id) = patch.tournament_id {
            self.check_tournament_ref(tournament_id)?;
        }
        let referee = self
            .referees
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Referee))?;
        if let Some(last_name) = last_name {
            referee.last_name = last_name;
        }
        if let Some(first_name) = first_name {
            referee.first_name = first_name;
        }
        if let Some(tournament_id) = patch.tournament_id {
            referee.tournament_id = tournament_id;
        }
        Ok(&*referee)
    }

    /// Delete a referee; its games lose their referee.
    pub fn delete_referee(&mut self, id: RefereeId) -> Result<Referee, StoreError> {
        let referee = self
            .referees
            .remove(id)
            .ok_or(StoreError::NotFound(Entity::Referee))?;
        for game in self.games.values_mut() {
            if game.referee_id == Some(id) {
                game.referee_id = None;
            }
        }
        Ok(referee)
    }

    pub fn set_referee_password(&mut self, id: RefereeId, password_hash: String) -> Result<(), StoreError> {
        let referee = self
            .referees
            .get_mut(id)
            .ok_or(StoreError::NotFound(Entity::Referee))?;
        referee.password_hash = Some(password_hash);
        Ok(())
    }

    // --- Accounts ---

    pub fn account(&self, id: AccountId) -> Result<&Account, StoreError> {
        self.accounts
            .get(id)
            .ok_or(StoreError::NotFound(Entity::Account))
    }

    pub fn account_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.username == username)
    }

    pub fn create_account(&mut self, username: &str, password_hash: String) -> Result<&Account, StoreError> {
        let username = required(username, "username")?;
        if self.account_by_username(&username).is_some() {
            return Err(StoreError::Rejected(format!(
                "Account {} already exists",
                username
            )));
        }
        Ok(self.accounts.insert(|id| Account {
            id,
            username,
            password_hash,
        }))
    }
}
