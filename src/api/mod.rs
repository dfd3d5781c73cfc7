//! HTTP API: one module per resource, mounted by [`configure`].
//!
//! Handlers take the store lock, do their work synchronously and release it before
//! responding. Errors are rendered as `{"error": "..."}` by [`ApiError`].

mod auth;
mod categories;
mod error;
mod games;
mod locker_rooms;
mod phases;
mod pools;
mod referees;
mod schedule;
mod standings;
mod teams;
mod tournaments;
mod upload;

pub use auth::AuthUser;
pub use error::ApiError;

use crate::config::Config;
use crate::logic::Sessions;
use crate::models::TournamentId;
use crate::store::Store;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared application state: the tables, the live sessions and the configuration.
pub struct AppState {
    store: RwLock<Store>,
    sessions: RwLock<Sessions>,
    pub config: Config,
}

pub type State = web::Data<AppState>;

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: RwLock::new(store),
            sessions: RwLock::new(Sessions::new(config.session_ttl)),
            config,
        }
    }

    pub fn store(&self) -> Result<RwLockReadGuard<'_, Store>, ApiError> {
        self.store.read().map_err(|_| ApiError::Lock)
    }

    pub fn store_mut(&self) -> Result<RwLockWriteGuard<'_, Store>, ApiError> {
        self.store.write().map_err(|_| ApiError::Lock)
    }

    pub fn sessions(&self) -> Result<RwLockWriteGuard<'_, Sessions>, ApiError> {
        self.sessions.write().map_err(|_| ApiError::Lock)
    }
}

/// Path segment: record id (e.g. /games/{id}).
#[derive(Deserialize)]
struct IdPath {
    id: u64,
}

/// Path segment: tournament id (e.g. /phases/tournaments/{tournament_id}).
#[derive(Deserialize)]
struct TournamentPath {
    tournament_id: TournamentId,
}

/// Path segments: tournament id and record id (e.g. /pools/tournaments/{tournament_id}/{id}).
#[derive(Deserialize)]
struct TournamentItemPath {
    tournament_id: TournamentId,
    id: u64,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

#[get("/api/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: "tournament-api",
    })
}

/// `{"message": ...}` body for operations that return no record.
fn message(text: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": text }))
}

/// Mount every route. Used by the server and by the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
    )
    .service(health)
    .configure(standings::configure)
    .configure(tournaments::configure)
    .configure(phases::configure)
    .configure(categories::configure)
    .configure(pools::configure)
    .configure(teams::configure)
    .configure(games::configure)
    .configure(referees::configure)
    .configure(locker_rooms::configure)
    .configure(schedule::configure)
    .configure(auth::configure)
    .configure(upload::configure);
}
