//! Web server: REST API, uploaded files under /uploads.
//! Run with: cargo run --bin web
//! Configuration comes from the environment (HOST, PORT, UPLOAD_DIR, SESSION_TTL_SECS,
//! ADMIN_USERNAME, ADMIN_PASSWORD); see `tournament_api::config`.

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web::Data, App, HttpServer};
use std::time::Duration;
use tournament_api::api::{self, AppState};
use tournament_api::logic::auth::seed_admin;
use tournament_api::{Config, Store};

/// How often idle sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let mut store = Store::new();
    match &config.admin_password {
        Some(password) => match seed_admin(&mut store, &config.admin_username, password) {
            Ok(id) => log::info!("Administrator account '{}' ready (id {})", config.admin_username, id),
            Err(e) => log::error!("Could not create administrator account: {}", e),
        },
        None => log::warn!("ADMIN_PASSWORD not set: no administrator account created"),
    }

    std::fs::create_dir_all(&config.upload_dir)?;
    let upload_dir = config.upload_dir.clone();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState::new(store, config));

    // Background task: drop sessions that have been idle longer than the TTL
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let mut sessions = match state_cleanup.sessions() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = sessions.purge_expired();
            if removed > 0 {
                log::info!("Cleaned up {} expired session(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
            .service(Files::new("/uploads", upload_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
