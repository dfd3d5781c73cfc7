//! Player data structures.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a player.
pub type PlayerId = u64;

/// A player on a team roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    /// Shirt number; rosters are listed in this order.
    pub number: Option<u32>,
    pub position: Option<String>,
    pub team_id: TeamId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPlayer {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub number: Option<u32>,
    pub position: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlayerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub number: Option<u32>,
    pub position: Option<String>,
}
