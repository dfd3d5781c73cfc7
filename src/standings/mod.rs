//! Standings: ranked team or club tables computed from completed games.
//!
//! Every computation follows the same steps: build one row per team (or per club), fold the
//! completed games into the rows, then sort by the view's tie-break cascade and number the rows.
//! Nothing here performs I/O; callers load teams, games and the point configuration first.

mod aggregate;
mod club;
mod rank;

pub use aggregate::{aggregate, Outcome};
pub use club::{group_into_clubs, strip_age_category, Club};
pub use rank::{rank, Cascade, TieBreak};

use crate::models::{Game, PointConfig, Team, TeamId};
use serde::Serialize;
use std::collections::HashMap;

/// One entry of a standings table: a team or a club.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StandingsRow {
    pub name: String,
    /// Set on team rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Set on club rows: every team of the club.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team_ids: Vec<TeamId>,
    pub logo: Option<String>,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_for: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_against: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_difference: Option<i64>,
    /// 1-based position after sorting. Zero until ranked.
    pub rank: usize,
}

impl StandingsRow {
    /// Empty row for a single team.
    pub fn for_team(team: &Team, track_goals: bool) -> Self {
        Self {
            name: team.name.clone(),
            team_id: Some(team.id),
            logo: team.logo.clone(),
            ..Self::empty(track_goals)
        }
    }

    /// Empty row for a club.
    pub fn for_club(club: &Club, track_goals: bool) -> Self {
        Self {
            name: club.name.clone(),
            team_ids: club.team_ids.clone(),
            logo: club.logo.clone(),
            ..Self::empty(track_goals)
        }
    }

    fn empty(track_goals: bool) -> Self {
        let goals = track_goals.then_some(0);
        Self {
            goals_for: goals,
            goals_against: goals,
            goal_difference: track_goals.then_some(0),
            ..Self::default()
        }
    }

    /// Club team ids as "1,2,3" (for flat exports).
    pub fn team_ids_string(&self) -> String {
        self.team_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Whether a table has one row per team or one row per club.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Grouping {
    Teams,
    Clubs,
}

/// How a particular standings table is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct View {
    pub grouping: Grouping,
    pub track_goals: bool,
    pub cascade: Cascade,
}

impl View {
    /// Club table of a single pool.
    pub const POOL: View = View {
        grouping: Grouping::Clubs,
        track_goals: false,
        cascade: Cascade::Plain,
    };
    /// Club table of each pool on the tournament overview, with goals.
    pub const POOL_OVERVIEW: View = View {
        grouping: Grouping::Clubs,
        track_goals: true,
        cascade: Cascade::GoalAware,
    };
    /// Team table of an age category.
    pub const CATEGORY: View = View {
        grouping: Grouping::Teams,
        track_goals: true,
        cascade: Cascade::GoalAware,
    };
    /// Team table across a whole tournament.
    pub const TOURNAMENT: View = View {
        grouping: Grouping::Teams,
        track_goals: true,
        cascade: Cascade::GoalAware,
    };
    /// Club table across a whole tournament.
    pub const TOURNAMENT_CLUBS: View = View {
        grouping: Grouping::Clubs,
        track_goals: false,
        cascade: Cascade::Plain,
    };
}

/// Build, fill and rank a standings table.
///
/// `games` must not contain duplicates. Games referencing teams outside `teams` are ignored.
pub fn compute(view: View, teams: &[Team], games: &[Game], points: PointConfig) -> Vec<StandingsRow> {
    let (mut rows, index): (Vec<StandingsRow>, HashMap<TeamId, usize>) = match view.grouping {
        Grouping::Teams => {
            let rows = teams
                .iter()
                .map(|t| StandingsRow::for_team(t, view.track_goals))
                .collect();
            let index = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
            (rows, index)
        }
        Grouping::Clubs => {
            let clubs = group_into_clubs(teams);
            let index = clubs
                .iter()
                .enumerate()
                .flat_map(|(i, club)| club.team_ids.iter().map(move |&id| (id, i)))
                .collect();
            let rows = clubs
                .iter()
                .map(|c| StandingsRow::for_club(c, view.track_goals))
                .collect();
            (rows, index)
        }
    };
    log::debug!(
        "Computing standings: {} rows, {} games, points {}/{}/{}",
        rows.len(),
        games.len(),
        points.win,
        points.draw,
        points.loss
    );
    aggregate(&mut rows, games, points, |team_id| index.get(&team_id).copied());
    rank(rows, view.cascade)
}
