use crate::api::{message, ApiError, State, TournamentItemPath, TournamentPath};
use crate::models::{NewPool, Pool, PoolPatch, TeamId, TournamentId};
use crate::store::Store;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

/// Pool with the names of its phase and category.
#[derive(Serialize)]
struct PoolView<'a> {
    #[serde(flatten)]
    pool: &'a Pool,
    phase_name: Option<String>,
    category_name: Option<String>,
}

fn view<'a>(store: &Store, pool: &'a Pool) -> PoolView<'a> {
    let (phase_name, category_name) = store.pool_labels(pool);
    PoolView {
        pool,
        phase_name,
        category_name,
    }
}

#[derive(Deserialize)]
struct PoolTeamPath {
    tournament_id: TournamentId,
    id: u64,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct AddTeamBody {
    team_id: TeamId,
}

#[get("/pools/tournaments/{tournament_id}")]
async fn list(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.tournament(path.tournament_id)?;
    let pools: Vec<PoolView> = store
        .pools_of(path.tournament_id)
        .into_iter()
        .map(|p| view(&store, p))
        .collect();
    Ok(HttpResponse::Ok().json(pools))
}

#[post("/pools/tournaments/{tournament_id}")]
async fn create(
    state: State,
    path: web::Path<TournamentPath>,
    body: web::Json<NewPool>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let pool = store.create_pool(path.tournament_id, body.into_inner())?;
    log::info!("Created pool {} ({})", pool.id, pool.name);
    Ok(HttpResponse::Created().json(pool))
}

#[get("/pools/tournaments/{tournament_id}/{id}")]
async fn get_one(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    let pool = store.pool_in(path.tournament_id, path.id)?;
    Ok(HttpResponse::Ok().json(view(&store, pool)))
}

#[put("/pools/tournaments/{tournament_id}/{id}")]
async fn update(
    state: State,
    path: web::Path<TournamentItemPath>,
    body: web::Json<PoolPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let pool = store.update_pool(path.tournament_id, path.id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(pool))
}

/// Deleting a pool removes its games and team memberships.
#[delete("/pools/tournaments/{tournament_id}/{id}")]
async fn remove(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.delete_pool(path.tournament_id, path.id)?;
    log::info!("Deleted pool {}", path.id);
    Ok(message("Pool deleted"))
}

#[get("/pools/tournaments/{tournament_id}/{id}/teams")]
async fn teams(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.pool_in(path.tournament_id, path.id)?;
    Ok(HttpResponse::Ok().json(store.teams_in_pool(path.tournament_id, path.id)))
}

#[post("/pools/tournaments/{tournament_id}/{id}/teams")]
async fn add_team(
    state: State,
    path: web::Path<TournamentItemPath>,
    body: web::Json<AddTeamBody>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.add_team_to_pool(path.tournament_id, path.id, body.team_id)?;
    log::info!("Added team {} to pool {}", body.team_id, path.id);
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Team added to pool",
        "pool_id": path.id,
        "team_id": body.team_id,
    })))
}

#[delete("/pools/tournaments/{tournament_id}/{id}/teams/{team_id}")]
async fn remove_team(state: State, path: web::Path<PoolTeamPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.remove_team_from_pool(path.tournament_id, path.id, path.team_id)?;
    Ok(message("Team removed from pool"))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(get_one)
        .service(update)
        .service(remove)
        .service(teams)
        .service(add_team)
        .service(remove_team);
}
