//! Teams and their locker rooms.

use crate::models::pool::CategoryId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a team (unique across tournaments).
pub type TeamId = u64;
pub type LockerRoomId = u64;

/// A team registered in a tournament. The name may carry an age-category suffix ("Falcons U10").
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Opaque logo reference (usually an `/uploads/...` URL).
    pub logo: Option<String>,
    pub tournament_id: TournamentId,
    pub category_id: Option<CategoryId>,
    /// Registration fee paid. Not used in scoring.
    pub paid: bool,
}

impl Team {
    /// Build a team record directly (used by tests and fixtures).
    pub fn new(id: TeamId, name: impl Into<String>, tournament_id: TournamentId) -> Self {
        Self {
            id,
            name: name.into(),
            logo: None,
            tournament_id,
            category_id: None,
            paid: false,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    #[serde(default)]
    pub name: String,
    pub logo: Option<String>,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub category_id: Option<CategoryId>,
    pub paid: Option<bool>,
}

/// Locker room assigned to a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LockerRoom {
    pub id: LockerRoomId,
    pub number: u32,
    pub team_id: TeamId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLockerRoom {
    pub number: u32,
    pub team_id: TeamId,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LockerRoomPatch {
    pub number: Option<u32>,
    pub team_id: Option<TeamId>,
}
