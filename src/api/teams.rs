//! Teams of a tournament, with their rosters, games and locker rooms.

use crate::api::{message, ApiError, State, TournamentItemPath, TournamentPath};
use crate::models::{NewPlayer, NewTeam, PlayerId, PlayerPatch, TeamId, TeamPatch, TournamentId};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
struct RosterPath {
    tournament_id: TournamentId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct PlayerPath {
    tournament_id: TournamentId,
    team_id: TeamId,
    id: PlayerId,
}

#[get("/teams/{tournament_id}")]
async fn list(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.tournament(path.tournament_id)?;
    Ok(HttpResponse::Ok().json(store.teams_of(path.tournament_id)))
}

#[post("/teams/{tournament_id}/teams")]
async fn create(
    state: State,
    path: web::Path<TournamentPath>,
    body: web::Json<NewTeam>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let team = store.create_team(path.tournament_id, body.into_inner())?;
    log::info!("Created team {} ({})", team.id, team.name);
    Ok(HttpResponse::Created().json(team))
}

#[get("/teams/{tournament_id}/teams/{id}")]
async fn get_one(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.team_in(path.tournament_id, path.id)?))
}

#[put("/teams/{tournament_id}/teams/{id}")]
async fn update(
    state: State,
    path: web::Path<TournamentItemPath>,
    body: web::Json<TeamPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    Ok(HttpResponse::Ok().json(store.update_team(path.tournament_id, path.id, body.into_inner())?))
}

#[delete("/teams/{tournament_id}/teams/{id}")]
async fn remove(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let team = store.delete_team(path.tournament_id, path.id)?;
    log::info!("Deleted team {} ({})", team.id, team.name);
    Ok(message("Team deleted"))
}

#[get("/teams/{tournament_id}/teams/{id}/games")]
async fn games(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.team_in(path.tournament_id, path.id)?;
    Ok(HttpResponse::Ok().json(store.games_of_team(path.id)))
}

#[get("/teams/{tournament_id}/teams/{id}/locker-room")]
async fn locker_room(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.team_in(path.tournament_id, path.id)?;
    Ok(HttpResponse::Ok().json(store.locker_rooms_of(path.id)))
}

// --- Players ---

#[get("/teams/{tournament_id}/teams/{team_id}/players")]
async fn players(state: State, path: web::Path<RosterPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.team_in(path.tournament_id, path.team_id)?;
    Ok(HttpResponse::Ok().json(store.players_of(path.team_id)))
}

#[post("/teams/{tournament_id}/teams/{team_id}/players")]
async fn create_player(
    state: State,
    path: web::Path<RosterPath>,
    body: web::Json<NewPlayer>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.team_in(path.tournament_id, path.team_id)?;
    let player = store.create_player(path.team_id, body.into_inner())?;
    log::info!("Added player {} to team {}", player.id, player.team_id);
    Ok(HttpResponse::Created().json(player))
}

#[get("/teams/{tournament_id}/teams/{team_id}/players/{id}")]
async fn get_player(state: State, path: web::Path<PlayerPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.team_in(path.tournament_id, path.team_id)?;
    Ok(HttpResponse::Ok().json(store.player_of(path.team_id, path.id)?))
}

#[put("/teams/{tournament_id}/teams/{team_id}/players/{id}")]
async fn update_player(
    state: State,
    path: web::Path<PlayerPath>,
    body: web::Json<PlayerPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.team_in(path.tournament_id, path.team_id)?;
    Ok(HttpResponse::Ok().json(store.update_player(path.team_id, path.id, body.into_inner())?))
}

#[delete("/teams/{tournament_id}/teams/{team_id}/players/{id}")]
async fn remove_player(state: State, path: web::Path<PlayerPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.team_in(path.tournament_id, path.team_id)?;
    store.delete_player(path.team_id, path.id)?;
    Ok(message("Player deleted"))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(get_one)
        .service(update)
        .service(remove)
        .service(games)
        .service(locker_room)
        .service(players)
        .service(create_player)
        .service(get_player)
        .service(update_player)
        .service(remove_player);
}
