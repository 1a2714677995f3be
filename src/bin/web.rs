//! Single binary web server: index page, /static assets, REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! SESSION_SECRET, WORKSPACE_IDLE_HOURS, AUTH_CALLBACK_SECRET.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{web::Data, App, HttpServer};
use basketball_subs_web::http::{self, AppState};
use basketball_subs_web::{MemoryStore, ServerConfig};
use std::time::Duration;

/// How often idle workspaces are swept.
const CLEANUP_EVERY: Duration = Duration::from_secs(30 * 60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let session_key = config.session_key();
    if config.callback_secret.is_none() {
        log::warn!("AUTH_CALLBACK_SECRET not set; sign-in is disabled");
    }
    let state = Data::new(AppState::new(MemoryStore::new()).with_callback_secret(config.callback_secret.clone()));

    // Background task: drop workspaces (and their rotation clocks) after inactivity
    let state_cleanup = state.clone();
    let idle_timeout = config.idle_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(CLEANUP_EVERY);
        loop {
            interval.tick().await;
            let removed = state_cleanup.cleanup_idle(idle_timeout);
            if removed > 0 {
                log::info!("Cleaned up {} inactive workspace(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .configure(http::configure::<MemoryStore>)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
