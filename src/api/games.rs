use crate::api::{message, ApiError, IdPath, State};
use crate::logic::generate_pool_games;
use crate::models::{GamePatch, NewGame, PoolId};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
struct PoolPath {
    pool_id: PoolId,
}

#[get("/games")]
async fn list(state: State) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.games()))
}

#[post("/games")]
async fn create(state: State, body: web::Json<NewGame>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let game = store.create_game(body.into_inner())?;
    log::info!(
        "Created game {}: team {} vs team {} in pool {}",
        game.id,
        game.team1_id,
        game.team2_id,
        game.pool_id
    );
    Ok(HttpResponse::Created().json(game))
}

#[get("/games/{id}")]
async fn get_one(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.game(path.id)?))
}

/// Update a game; scores and completion are entered here.
#[put("/games/{id}")]
async fn update(
    state: State,
    path: web::Path<IdPath>,
    body: web::Json<GamePatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    Ok(HttpResponse::Ok().json(store.update_game(path.id, body.into_inner())?))
}

#[delete("/games/{id}")]
async fn remove(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.delete_game(path.id)?;
    log::info!("Deleted game {}", path.id);
    Ok(message("Game deleted"))
}

#[get("/games/pool/{pool_id}")]
async fn by_pool(state: State, path: web::Path<PoolPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.games_of_pool(path.pool_id)?))
}

/// Round-robin: one game for every pair of pool teams that has none yet.
#[post("/games/pool/{pool_id}/generate")]
async fn generate(state: State, path: web::Path<PoolPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let games = generate_pool_games(&mut store, path.pool_id, &mut rand::thread_rng())?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": format!("{} game(s) generated", games.len()),
        "games": games,
    })))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(by_pool)
        .service(generate)
        .service(get_one)
        .service(update)
        .service(remove);
}
