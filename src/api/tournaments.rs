use crate::api::{message, ApiError, IdPath, State};
use crate::models::{NewTournament, TournamentPatch};
use actix_web::{delete, get, post, put, web, HttpResponse};

#[get("/tournaments")]
async fn list(state: State) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.tournaments()))
}

#[post("/tournaments")]
async fn create(state: State, body: web::Json<NewTournament>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let tournament = store.create_tournament(body.into_inner())?;
    log::info!("Created tournament {} ({})", tournament.id, tournament.name);
    Ok(HttpResponse::Created().json(tournament))
}

#[get("/tournaments/{id}")]
async fn get_one(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.tournament(path.id)?))
}

#[put("/tournaments/{id}")]
async fn update(
    state: State,
    path: web::Path<IdPath>,
    body: web::Json<TournamentPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    Ok(HttpResponse::Ok().json(store.update_tournament(path.id, body.into_inner())?))
}

/// Deleting a tournament removes its phases, pools, categories, teams, games and referees.
#[delete("/tournaments/{id}")]
async fn remove(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let tournament = store.delete_tournament(path.id)?;
    log::info!("Deleted tournament {} ({})", tournament.id, tournament.name);
    Ok(message("Tournament deleted"))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(get_one)
        .service(update)
        .service(remove);
}
