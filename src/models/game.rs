//! Game (match) between two teams of a pool.

use crate::models::pool::PoolId;
use crate::models::referee::RefereeId;
use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unique identifier for a game.
pub type GameId = u64;

/// A single game. Scores stay `None` until entered; only completed games count in standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// None until the schedule has been generated.
    pub start_time: Option<NaiveDateTime>,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub is_completed: bool,
    pub referee_id: Option<RefereeId>,
    pub pool_id: PoolId,
    pub tournament_id: TournamentId,
}

impl Game {
    /// A not-yet-played game (used by generators and tests).
    pub fn new(
        id: GameId,
        team1_id: TeamId,
        team2_id: TeamId,
        pool_id: PoolId,
        tournament_id: TournamentId,
    ) -> Self {
        Self {
            id,
            start_time: None,
            team1_id,
            team2_id,
            team1_score: None,
            team2_score: None,
            is_completed: false,
            referee_id: None,
            pool_id,
            tournament_id,
        }
    }

    /// Record a final score and mark the game completed.
    pub fn completed(mut self, team1_score: u32, team2_score: u32) -> Self {
        self.team1_score = Some(team1_score);
        self.team2_score = Some(team2_score);
        self.is_completed = true;
        self
    }

    /// Scores with "not entered" read as zero.
    pub fn scores(&self) -> (u32, u32) {
        (self.team1_score.unwrap_or(0), self.team2_score.unwrap_or(0))
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }
}

/// Body of a game creation request. The tournament is taken from the pool.
#[derive(Clone, Debug, Deserialize)]
pub struct NewGame {
    pub start_time: Option<NaiveDateTime>,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    #[serde(default)]
    pub is_completed: bool,
    pub referee_id: Option<RefereeId>,
    pub pool_id: PoolId,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GamePatch {
    pub start_time: Option<NaiveDateTime>,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub team1_score: Option<u32>,
    pub team2_score: Option<u32>,
    pub is_completed: Option<bool>,
    pub referee_id: Option<RefereeId>,
    pub pool_id: Option<PoolId>,
}
