//! Tournament and its point configuration.

use crate::models::referee::AccountId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unique identifier for a tournament.
pub type TournamentId = u64;

pub const DEFAULT_BREAK_TIME: u32 = 5;

/// Points awarded per match outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// A tournament: where and when it happens, and how matches are scored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub location: String,
    /// Minutes between two consecutive games on the schedule.
    pub break_time: u32,
    pub points_win: u32,
    pub points_draw: u32,
    pub points_loss: u32,
    /// Administrator account owning the tournament, if any.
    pub account_id: Option<AccountId>,
}

impl Tournament {
    pub fn point_config(&self) -> PointConfig {
        PointConfig {
            win: self.points_win,
            draw: self.points_draw,
            loss: self.points_loss,
        }
    }
}

/// Body of a tournament creation request.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTournament {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    pub break_time: Option<u32>,
    pub points_win: Option<u32>,
    pub points_draw: Option<u32>,
    pub points_loss: Option<u32>,
    pub account_id: Option<AccountId>,
}

/// Partial update: absent fields keep their current value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TournamentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub break_time: Option<u32>,
    pub points_win: Option<u32>,
    pub points_draw: Option<u32>,
    pub points_loss: Option<u32>,
}
