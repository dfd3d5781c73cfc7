use crate::api::{message, ApiError, IdPath, State};
use crate::models::{LockerRoomPatch, NewLockerRoom, TeamId};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
struct TeamPath {
    team_id: TeamId,
}

#[get("/locker-rooms")]
async fn list(state: State) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.locker_rooms()))
}

#[post("/locker-rooms")]
async fn create(state: State, body: web::Json<NewLockerRoom>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let room = store.create_locker_room(body.into_inner())?;
    log::info!("Assigned locker room {} to team {}", room.number, room.team_id);
    Ok(HttpResponse::Created().json(room))
}

#[get("/locker-rooms/team/{team_id}")]
async fn by_team(state: State, path: web::Path<TeamPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.team(path.team_id)?;
    Ok(HttpResponse::Ok().json(store.locker_rooms_of(path.team_id)))
}

#[get("/locker-rooms/{id}")]
async fn get_one(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.locker_room(path.id)?))
}

#[put("/locker-rooms/{id}")]
async fn update(
    state: State,
    path: web::Path<IdPath>,
    body: web::Json<LockerRoomPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    Ok(HttpResponse::Ok().json(store.update_locker_room(path.id, body.into_inner())?))
}

#[delete("/locker-rooms/{id}")]
async fn remove(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.delete_locker_room(path.id)?;
    Ok(message("Locker room deleted"))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(by_team)
        .service(get_one)
        .service(update)
        .service(remove);
}
