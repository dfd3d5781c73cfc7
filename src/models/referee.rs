//! Referees and administrator accounts.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RefereeId = u64;
pub type AccountId = u64;

/// A referee. Logs in with its last name and either the login UUID or a password.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Referee {
    pub id: RefereeId,
    pub last_name: String,
    pub first_name: String,
    pub login_uuid: Uuid,
    /// Argon2 PHC string; never serialized.
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub tournament_id: TournamentId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewReferee {
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    pub tournament_id: TournamentId,
    /// Initial password; when absent the referee logs in with its UUID.
    pub password: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RefereePatch {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub tournament_id: Option<TournamentId>,
}

/// Administrator account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub password_hash: String,
}
