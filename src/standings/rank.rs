//! Sorting standings rows and assigning ranks.

use crate::standings::StandingsRow;
use std::cmp::Ordering;

/// One ranking criterion. Each compares so that the better row sorts first.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TieBreak {
    Points,
    Wins,
    GoalDifference,
    GoalsFor,
    /// Fewer games played ranks higher.
    FewerMatchesPlayed,
}

impl TieBreak {
    pub fn compare(self, a: &StandingsRow, b: &StandingsRow) -> Ordering {
        match self {
            TieBreak::Points => b.points.cmp(&a.points),
            TieBreak::Wins => b.wins.cmp(&a.wins),
            TieBreak::GoalDifference => b
                .goal_difference
                .unwrap_or(0)
                .cmp(&a.goal_difference.unwrap_or(0)),
            TieBreak::GoalsFor => b.goals_for.unwrap_or(0).cmp(&a.goals_for.unwrap_or(0)),
            TieBreak::FewerMatchesPlayed => a.matches_played.cmp(&b.matches_played),
        }
    }
}

/// Ordered list of criteria used by a standings view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cascade {
    /// Points, wins, fewer matches played.
    Plain,
    /// Points, goal difference, goals for, wins, fewer matches played.
    GoalAware,
}

impl Cascade {
    pub fn criteria(self) -> &'static [TieBreak] {
        match self {
            Cascade::Plain => &[TieBreak::Points, TieBreak::Wins, TieBreak::FewerMatchesPlayed],
            Cascade::GoalAware => &[
                TieBreak::Points,
                TieBreak::GoalDifference,
                TieBreak::GoalsFor,
                TieBreak::Wins,
                TieBreak::FewerMatchesPlayed,
            ],
        }
    }

    pub fn compare(self, a: &StandingsRow, b: &StandingsRow) -> Ordering {
        self.criteria()
            .iter()
            .map(|criterion| criterion.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Sort rows by `cascade` and number them 1..N by position.
///
/// The sort is stable, so rows equal on every criterion keep their input order; they still get
/// distinct ranks.
pub fn rank(mut rows: Vec<StandingsRow>, cascade: Cascade) -> Vec<StandingsRow> {
    rows.sort_by(|a, b| cascade.compare(a, b));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}
