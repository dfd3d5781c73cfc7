//! Login, referee verification and password management.

use crate::api::{message, ApiError, AppState, IdPath, State};
use crate::logic::auth::{self, AuthError, SessionUser};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{get, post, web, FromRequest, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

/// The user behind the request's `Authorization: Bearer <token>` header.
///
/// Extracting it refreshes the session; a missing header is 401, an unknown or expired token 403.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: Uuid,
}

fn bearer_token(req: &HttpRequest) -> Result<Uuid, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;
    Uuid::parse_str(token.trim()).map_err(|_| AuthError::InvalidToken)
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| -> Result<Self, ApiError> {
            let token = bearer_token(req)?;
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or(ApiError::Lock)?;
            let user = state.sessions()?.touch(token)?;
            Ok(AuthUser { user, token })
        })();
        ready(result)
    }
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct UpdatePasswordBody {
    uuid: Uuid,
    #[serde(default)]
    current_password: String,
    #[serde(default)]
    new_password: String,
}

#[derive(Deserialize)]
struct AccountBody {
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    user: SessionUser,
    token: Uuid,
}

fn open_session(state: &AppState, user: SessionUser) -> Result<LoginResponse, ApiError> {
    let token = state.sessions()?.issue(user.clone());
    Ok(LoginResponse { user, token })
}

#[post("/auth/login")]
async fn login(state: State, body: web::Json<LoginBody>) -> Result<HttpResponse, ApiError> {
    let user = {
        let store = state.store()?;
        auth::login(&store, &body.username, &body.password)?
    };
    log::info!("{} logged in (admin: {})", user.username, user.is_admin);
    Ok(HttpResponse::Ok().json(open_session(&state, user)?))
}

#[derive(Deserialize)]
struct UuidPath {
    uuid: String,
}

/// Log a referee in from its login UUID.
#[get("/auth/verify/{uuid}")]
async fn verify(state: State, path: web::Path<UuidPath>) -> Result<HttpResponse, ApiError> {
    let uuid = Uuid::parse_str(&path.uuid).map_err(|_| AuthError::UnknownUuid)?;
    let user = {
        let store = state.store()?;
        auth::verify_uuid(&store, uuid)?
    };
    let session = open_session(&state, user)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "authenticated": true,
        "user": session.user,
        "token": session.token,
    })))
}

#[post("/auth/update-password")]
async fn update_password(state: State, body: web::Json<UpdatePasswordBody>) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    auth::update_password(&mut store, body.uuid, &body.current_password, &body.new_password)?;
    Ok(message("Password updated"))
}

/// Set the first password of a referee that logs in with its UUID so far.
#[post("/auth/referees/{id}/account")]
async fn create_account(
    state: State,
    path: web::Path<IdPath>,
    body: web::Json<AccountBody>,
) -> Result<HttpResponse, ApiError> {
    let mut store = state.store_mut()?;
    auth::create_referee_account(&mut store, path.id, &body.password)?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Account created",
        "referee_id": path.id,
    })))
}

#[get("/auth/me")]
async fn me(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.user)
}

/// End the session behind the bearer token.
#[post("/auth/logout")]
async fn logout(state: State, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    state.sessions()?.revoke(auth.token);
    log::info!("{} logged out", auth.user.username);
    Ok(message("Logged out"))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(verify)
        .service(update_password)
        .service(create_account)
        .service(me)
        .service(logout);
}
