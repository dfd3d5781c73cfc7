//! Time slots for games, and the per-pool schedule view.

use crate::models::{GameId, TeamId, TournamentId, DEFAULT_BREAK_TIME};
use crate::store::{Store, StoreError};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Assign consecutive start times to the tournament's games, from its start date.
///
/// Games are taken by category, then pool, then game id; games in pools without a category
/// are left untouched. Each slot lasts the category's game duration plus the tournament's
/// break time; zero durations and breaks fall back to the defaults. Returns the number of
/// games updated.
pub fn generate_schedule(store: &mut Store, tournament_id: TournamentId) -> Result<usize, StoreError> {
    let tournament = store.tournament(tournament_id)?;
    let break_time = match tournament.break_time {
        0 => i64::from(DEFAULT_BREAK_TIME),
        minutes => i64::from(minutes),
    };
    let mut current = tournament.start_date;

    let slots = store.schedule_slots(tournament_id);
    for slot in &slots {
        store.set_start_time(slot.game_id, current)?;
        current += Duration::minutes(i64::from(slot.game_duration) + break_time);
    }
    log::info!(
        "Scheduled {} game(s) of tournament {}",
        slots.len(),
        tournament_id
    );
    Ok(slots.len())
}

#[derive(Clone, Debug, Serialize)]
pub struct ScheduledTeam {
    pub id: TeamId,
    pub name: String,
    pub score: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScheduledGame {
    pub game_id: GameId,
    pub start_time: Option<NaiveDateTime>,
    pub team1: ScheduledTeam,
    pub team2: ScheduledTeam,
    /// Referee's last name.
    pub referee: Option<String>,
    pub is_completed: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Schedule {
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    /// Games by pool name, each list ordered by start time (unscheduled games last).
    pub schedule: BTreeMap<String, Vec<ScheduledGame>>,
}

/// Schedule of a tournament grouped by pool.
pub fn schedule_view(store: &Store, tournament_id: TournamentId) -> Result<Schedule, StoreError> {
    let tournament = store.tournament(tournament_id)?;
    let mut games = store.games_of_tournament(tournament_id);
    games.sort_by_key(|g| (g.start_time.is_none(), g.start_time, g.id));

    let team = |id: TeamId, score: Option<u32>| -> Option<ScheduledTeam> {
        store.team(id).ok().map(|t| ScheduledTeam {
            id,
            name: t.name.clone(),
            score,
        })
    };

    let mut schedule: BTreeMap<String, Vec<ScheduledGame>> = BTreeMap::new();
    for game in games {
        let Ok(pool) = store.pool(game.pool_id) else {
            continue;
        };
        let (Some(team1), Some(team2)) = (
            team(game.team1_id, game.team1_score),
            team(game.team2_id, game.team2_score),
        ) else {
            continue;
        };
        let referee = game
            .referee_id
            .and_then(|id| store.referee(id).ok())
            .map(|r| r.last_name.clone());
        schedule
            .entry(pool.name.clone())
            .or_default()
            .push(ScheduledGame {
                game_id: game.id,
                start_time: game.start_time,
                team1,
                team2,
                referee,
                is_completed: game.is_completed,
            });
    }

    Ok(Schedule {
        tournament_id,
        tournament_name: tournament.name.clone(),
        schedule,
    })
}
