use crate::api::{ApiError, State, TournamentPath};
use crate::logic::{generate_schedule, schedule_view};
use actix_web::{get, post, web, HttpResponse};

/// Give every categorised game of the tournament a start time.
#[post("/schedule/tournaments/{tournament_id}/generate")]
async fn generate(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let updated = generate_schedule(&mut store, path.tournament_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Schedule generated",
        "games_updated": updated,
    })))
}

#[get("/schedule/tournaments/{tournament_id}")]
async fn view(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(schedule_view(&store, path.tournament_id)?))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate).service(view);
}
