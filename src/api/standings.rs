//! Standings endpoints. Each handler copies a snapshot out of the store, releases the lock
//! and computes the table. `?format=csv` returns the rows as CSV instead of JSON.

use crate::api::{ApiError, State, TournamentItemPath, TournamentPath};
use crate::standings::{self, StandingsRow, View};
use crate::store::Snapshot;
use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct FormatQuery {
    format: Option<String>,
}

impl FormatQuery {
    fn is_csv(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("csv"))
    }
}

/// Flat CSV line: club team ids joined, absent goal columns left empty.
#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    name: &'a str,
    team_ids: String,
    matches_played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    points: u32,
    goals_for: Option<u32>,
    goals_against: Option<u32>,
    goal_difference: Option<i64>,
}

impl<'a> From<&'a StandingsRow> for CsvRow<'a> {
    fn from(row: &'a StandingsRow) -> Self {
        let team_ids = match row.team_id {
            Some(id) => id.to_string(),
            None => row.team_ids_string(),
        };
        Self {
            rank: row.rank,
            name: &row.name,
            team_ids,
            matches_played: row.matches_played,
            wins: row.wins,
            draws: row.draws,
            losses: row.losses,
            points: row.points,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row.goal_difference,
        }
    }
}

fn to_csv(rows: &[StandingsRow]) -> Result<Vec<u8>, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }
    writer.into_inner().map_err(|e| ApiError::Io(e.into_error()))
}

fn respond(rows: Vec<StandingsRow>, query: &FormatQuery) -> Result<HttpResponse, ApiError> {
    if query.is_csv() {
        return Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(to_csv(&rows)?));
    }
    Ok(HttpResponse::Ok().json(rows))
}

fn compute(view: View, snapshot: &Snapshot) -> Vec<StandingsRow> {
    standings::compute(view, &snapshot.teams, &snapshot.games, snapshot.points)
}

/// Club table of one pool.
#[get("/pools/tournaments/{tournament_id}/{id}/standings")]
async fn pool(
    state: State,
    path: web::Path<TournamentItemPath>,
    query: web::Query<FormatQuery>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.store()?.pool_snapshot(path.tournament_id, path.id)?;
    if snapshot.teams.is_empty() {
        return Err(ApiError::NotFound("No teams found in this pool".to_string()));
    }
    respond(compute(View::POOL, &snapshot), &query)
}

#[derive(Serialize)]
struct PoolBlock {
    pool_id: u64,
    pool_name: String,
    phase_name: Option<String>,
    category_name: Option<String>,
    standings: Vec<StandingsRow>,
}

/// One club table per pool of the tournament. Always JSON.
#[get("/pools/tournaments/{tournament_id}/standings/all")]
async fn all_pools(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let snapshots = state.store()?.all_pool_snapshots(path.tournament_id)?;
    let blocks: Vec<PoolBlock> = snapshots
        .into_iter()
        .map(|block| PoolBlock {
            pool_id: block.pool.id,
            standings: compute(View::POOL_OVERVIEW, &block.snapshot),
            pool_name: block.pool.name,
            phase_name: block.phase_name,
            category_name: block.category_name,
        })
        .collect();
    Ok(HttpResponse::Ok().json(blocks))
}

#[get("/categories/tournaments/{tournament_id}/{id}/standings")]
async fn category(
    state: State,
    path: web::Path<TournamentItemPath>,
    query: web::Query<FormatQuery>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.store()?.category_snapshot(path.tournament_id, path.id)?;
    respond(compute(View::CATEGORY, &snapshot), &query)
}

#[get("/tournaments/{tournament_id}/standings")]
async fn tournament(
    state: State,
    path: web::Path<TournamentPath>,
    query: web::Query<FormatQuery>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.store()?.tournament_snapshot(path.tournament_id)?;
    respond(compute(View::TOURNAMENT, &snapshot), &query)
}

#[get("/tournaments/{tournament_id}/standings/clubs")]
async fn tournament_clubs(
    state: State,
    path: web::Path<TournamentPath>,
    query: web::Query<FormatQuery>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.store()?.tournament_snapshot(path.tournament_id)?;
    respond(compute(View::TOURNAMENT_CLUBS, &snapshot), &query)
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(all_pools)
        .service(pool)
        .service(category)
        .service(tournament)
        .service(tournament_clubs);
}
