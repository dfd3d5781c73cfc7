use crate::api::{message, ApiError, IdPath, State, TournamentPath};
use crate::logic::auth::hash_password;
use crate::models::{NewReferee, RefereePatch, Tournament};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
struct UuidPath {
    uuid: Uuid,
}

/// A tournament on a referee's dashboard, with its sizes.
#[derive(Serialize)]
struct TournamentSummary<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    teams_count: usize,
    pools_count: usize,
    games_count: usize,
}

#[get("/referees")]
async fn list(state: State) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.referees()))
}

/// Create a referee. A login UUID is generated; an optional initial password is hashed.
#[post("/referees")]
async fn create(state: State, body: web::Json<NewReferee>) -> Result<HttpResponse, ApiError> {
    let new = body.into_inner();
    let password_hash = match new.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let mut store = state.store_mut()?;
    let referee = store.create_referee(new, password_hash)?;
    log::info!(
        "Created referee {} ({} {})",
        referee.id,
        referee.first_name,
        referee.last_name
    );
    Ok(HttpResponse::Created().json(referee))
}

#[get("/referees/uuid/{uuid}")]
async fn by_uuid(state: State, path: web::Path<UuidPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.referee_by_uuid(path.uuid)?))
}

#[get("/referees/tournaments/{tournament_id}")]
async fn by_tournament(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.tournament(path.tournament_id)?;
    Ok(HttpResponse::Ok().json(store.referees_of(path.tournament_id)))
}

#[get("/referees/{id}")]
async fn get_one(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.referee(path.id)?))
}

#[put("/referees/{id}")]
async fn update(
    state: State,
    path: web::Path<IdPath>,
    body: web::Json<RefereePatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    Ok(HttpResponse::Ok().json(store.update_referee(path.id, body.into_inner())?))
}

/// Deleting a referee leaves its games without a referee.
#[delete("/referees/{id}")]
async fn remove(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.delete_referee(path.id)?;
    log::info!("Deleted referee {}", path.id);
    Ok(message("Referee deleted"))
}

#[get("/referees/{id}/games")]
async fn games(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.referee(path.id)?;
    Ok(HttpResponse::Ok().json(store.games_of_referee(path.id)))
}

/// The referee's tournament, with team, pool and game counts.
#[get("/referees/{id}/tournaments")]
async fn tournaments(state: State, path: web::Path<IdPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    let referee = store.referee(path.id)?;
    let summaries: Vec<TournamentSummary> = store
        .tournament(referee.tournament_id)
        .ok()
        .map(|tournament| {
            let (teams_count, pools_count, games_count) = store.tournament_counts(tournament.id);
            TournamentSummary {
                tournament,
                teams_count,
                pools_count,
                games_count,
            }
        })
        .into_iter()
        .collect();
    Ok(HttpResponse::Ok().json(summaries))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(by_uuid)
        .service(by_tournament)
        .service(get_one)
        .service(update)
        .service(remove)
        .service(games)
        .service(tournaments);
}
