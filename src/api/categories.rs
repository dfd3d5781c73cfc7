use crate::api::{message, ApiError, State, TournamentItemPath, TournamentPath};
use crate::models::{CategoryPatch, NewCategory};
use actix_web::{delete, get, post, put, web, HttpResponse};

#[get("/categories/tournaments/{tournament_id}")]
async fn list(state: State, path: web::Path<TournamentPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.tournament(path.tournament_id)?;
    Ok(HttpResponse::Ok().json(store.categories_of(path.tournament_id)))
}

#[post("/categories/tournaments/{tournament_id}")]
async fn create(
    state: State,
    path: web::Path<TournamentPath>,
    body: web::Json<NewCategory>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let category = store.create_category(path.tournament_id, body.into_inner())?;
    log::info!("Created category {} ({})", category.id, category.name);
    Ok(HttpResponse::Created().json(category))
}

#[get("/categories/tournaments/{tournament_id}/{id}")]
async fn get_one(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.category_in(path.tournament_id, path.id)?))
}

#[put("/categories/tournaments/{tournament_id}/{id}")]
async fn update(
    state: State,
    path: web::Path<TournamentItemPath>,
    body: web::Json<CategoryPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    let category = store.update_category(path.tournament_id, path.id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/categories/tournaments/{tournament_id}/{id}")]
async fn remove(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    store.delete_category(path.tournament_id, path.id)?;
    log::info!("Deleted category {}", path.id);
    Ok(message("Category deleted"))
}

#[get("/categories/tournaments/{tournament_id}/{id}/pools")]
async fn pools(state: State, path: web::Path<TournamentItemPath>) -> Result<HttpResponse, ApiError> {
    let store = state.store()?;
    store.category_in(path.tournament_id, path.id)?;
    Ok(HttpResponse::Ok().json(store.pools_of_category(path.tournament_id, path.id)))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(get_one)
        .service(update)
        .service(remove)
        .service(pools);
}
