//! Round-robin game generation for a pool.

use crate::models::{Game, NewGame, PoolId, TeamId};
use crate::store::{Store, StoreError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Create one game for every pair of pool teams that has not met yet in this pool.
///
/// 1. Load the pool's teams (at least 2) and its tournament's referees (at least 1).
/// 2. Collect the pairs that already have a game, in either order.
/// 3. For each missing pair (by team id), create a game with a random referee.
///
/// Returns the created games; an empty list when the round-robin is already complete.
pub fn generate_pool_games<R: Rng>(
    store: &mut Store,
    pool_id: PoolId,
    rng: &mut R,
) -> Result<Vec<Game>, StoreError> {
    let pool = store.pool(pool_id)?;
    let tournament_id = store
        .pool_tournament(pool)
        .ok_or_else(|| StoreError::Rejected("Pool has no tournament".to_string()))?;

    let team_ids: Vec<TeamId> = store
        .teams_in_pool(tournament_id, pool_id)
        .iter()
        .map(|t| t.id)
        .collect();
    if team_ids.len() < 2 {
        return Err(StoreError::Rejected(
            "At least 2 teams are needed in the pool to generate games".to_string(),
        ));
    }
    let referee_ids: Vec<_> = store
        .referees_of(tournament_id)
        .iter()
        .map(|r| r.id)
        .collect();
    if referee_ids.is_empty() {
        return Err(StoreError::Rejected(
            "No referee available in this tournament".to_string(),
        ));
    }

    let played: HashSet<(TeamId, TeamId)> = store
        .games_of_pool(pool_id)?
        .iter()
        .map(|g| ordered_pair(g.team1_id, g.team2_id))
        .collect();

    let mut created = Vec::new();
    for (i, &team1_id) in team_ids.iter().enumerate() {
        for &team2_id in &team_ids[i + 1..] {
            if played.contains(&ordered_pair(team1_id, team2_id)) {
                continue;
            }
            let referee_id = referee_ids.choose(rng).copied();
            let game = store.create_game(NewGame {
                start_time: None,
                team1_id,
                team2_id,
                team1_score: None,
                team2_score: None,
                is_completed: false,
                referee_id,
                pool_id,
            })?;
            created.push(game.clone());
        }
    }
    log::info!(
        "Generated {} game(s) for pool {} ({} teams)",
        created.len(),
        pool_id,
        team_ids.len()
    );
    Ok(created)
}

fn ordered_pair(a: TeamId, b: TeamId) -> (TeamId, TeamId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
