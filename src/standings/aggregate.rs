//! Folding completed games into standings rows.

use crate::models::{Game, PointConfig, TeamId};
use crate::standings::StandingsRow;
use std::cmp::Ordering;

/// Outcome of one game from one side's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    fn from_scores(scored: u32, conceded: u32) -> Self {
        match scored.cmp(&conceded) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Draw,
        }
    }
}

impl StandingsRow {
    /// Apply one played game to this row. Goals are only counted on rows that track them.
    ///
    /// Counters saturate at `u32::MAX`.
    pub fn record(&mut self, outcome: Outcome, scored: u32, conceded: u32, points: PointConfig) {
        self.matches_played = self.matches_played.saturating_add(1);
        let awarded = match outcome {
            Outcome::Win => {
                self.wins = self.wins.saturating_add(1);
                points.win
            }
            Outcome::Draw => {
                self.draws = self.draws.saturating_add(1);
                points.draw
            }
            Outcome::Loss => {
                self.losses = self.losses.saturating_add(1);
                points.loss
            }
        };
        self.points = self.points.saturating_add(awarded);
        if let Some(goals_for) = self.goals_for.as_mut() {
            *goals_for = goals_for.saturating_add(scored);
        }
        if let Some(goals_against) = self.goals_against.as_mut() {
            *goals_against = goals_against.saturating_add(conceded);
        }
    }
}

/// Fold `games` into `rows`. `resolve` maps a team id to the index of its row.
///
/// Incomplete games are ignored. A game where either side does not resolve is skipped entirely.
/// When both sides resolve to the same row (two teams of one club meeting) the row gets one
/// match played and nothing else. Games are not deduplicated.
pub fn aggregate<F>(rows: &mut [StandingsRow], games: &[Game], points: PointConfig, resolve: F)
where
    F: Fn(TeamId) -> Option<usize>,
{
    for game in games {
        if !game.is_completed {
            log::debug!("Game {} not completed, skipped", game.id);
            continue;
        }
        let (Some(side1), Some(side2)) = (resolve(game.team1_id), resolve(game.team2_id)) else {
            log::debug!(
                "Game {}: team {} or team {} outside this table, skipped",
                game.id,
                game.team1_id,
                game.team2_id
            );
            continue;
        };
        let (score1, score2) = game.scores();
        log::debug!(
            "Game {}: {} vs {}, {}-{}",
            game.id,
            rows[side1].name,
            rows[side2].name,
            score1,
            score2
        );
        if side1 == side2 {
            rows[side1].matches_played = rows[side1].matches_played.saturating_add(1);
            continue;
        }
        rows[side1].record(Outcome::from_scores(score1, score2), score1, score2, points);
        rows[side2].record(Outcome::from_scores(score2, score1), score2, score1, points);
    }

    for row in rows.iter_mut() {
        if let (Some(goals_for), Some(goals_against)) = (row.goals_for, row.goals_against) {
            row.goal_difference = Some(i64::from(goals_for) - i64::from(goals_against));
        }
    }
}
