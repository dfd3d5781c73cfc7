use crate::api::{message, ApiError, IdPath, State, TournamentPath};
use crate::models::{NewPhase, PhasePatch};
use actix_web::{delete, get, post, put, web, HttpResponse};

#[get("/phases/tournaments/{tournament_id}")]
async fn list(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.tournament(path.tournament_id)?;
    Ok(HttpResponse::Ok().json(store.phases_of(path.tournament_id)))
}

#[post("/phases/tournaments/{tournament_id}")]
async fn create(
    state: State,
    path: web::Path<TournamentPath>,
    body: web::Json<NewPhase>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let phase = store.create_phase(path.tournament_id, body.into_inner())?;
    log::info!("Created phase {} in tournament {}", phase.id, phase.tournament_id);
    Ok(HttpResponse::Created().json(phase))
}

#[get("/phases/{id}")]
async fn get_one(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.phase(path.id)?))
}

#[put("/phases/{id}")]
async fn update(
    state: State,
    path: web::Path<IdPath>,
    body: web::Json<PhasePatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    Ok(HttpResponse::Ok().json(store.update_phase(path.id, body.into_inner())?))
}

#[delete("/phases/{id}")]
async fn remove(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.delete_phase(path.id)?;
    log::info!("Deleted phase {}", path.id);
    Ok(message("Phase deleted"))
}

#[get("/phases/{id}/pools")]
async fn pools(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.phase(path.id)?;
    Ok(HttpResponse::Ok().json(store.pools_of_phase(path.id)))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(get_one)
        .service(update)
        .service(remove)
        .service(pools);
}
