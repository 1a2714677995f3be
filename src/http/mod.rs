//! HTTP surface: team insert routes, identity session, and per-viewer workspace.
//!
//! Handlers are generic over the record store so tests can plug in a failing one.
//! Register with `App::new().app_data(Data::new(AppState::new(store))).configure(configure::<S>)`
//! behind an `actix-session` middleware.

mod session;
mod teams;
mod workspace;

use crate::logic::Workspace;
use crate::models::AuthSession;
use crate::store::TeamStore;
use actix_web::{get, web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

pub use session::{CALLBACK_SECRET_HEADER, SESSION_KEY};

/// Per-viewer workspace + last activity time (for auto-cleanup).
struct WorkspaceEntry {
    workspace: Arc<tokio::sync::Mutex<Workspace>>,
    last_activity: Instant,
}

/// Shared application state: the record store and every viewer's workspace.
pub struct AppState<S> {
    pub store: S,
    workspaces: RwLock<HashMap<String, WorkspaceEntry>>,
    /// Secret the identity provider's callback presents on sign-in.
    callback_secret: Option<String>,
}

impl<S: TeamStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            workspaces: RwLock::new(HashMap::new()),
            callback_secret: None,
        }
    }

    /// Accept sign-ins that present this secret. Without one, sign-in is refused.
    pub fn with_callback_secret(mut self, secret: Option<String>) -> Self {
        self.callback_secret = secret;
        self
    }

    /// Workspace of the signed-in viewer, created on first use. Touching it
    /// refreshes its last activity.
    fn workspace_for(&self, session: &AuthSession) -> Result<Arc<tokio::sync::Mutex<Workspace>>, HttpResponse> {
        let key = session
            .viewer_key()
            .ok_or_else(|| error_response(HttpResponse::Unauthorized(), "Session has no user"))?;
        let mut g = self
            .workspaces
            .write()
            .map_err(|_| HttpResponse::InternalServerError().body("lock error"))?;
        let entry = g.entry(key).or_insert_with(|| WorkspaceEntry {
            workspace: Arc::new(tokio::sync::Mutex::new(Workspace::new(session.clone()))),
            last_activity: Instant::now(),
        });
        entry.last_activity = Instant::now();
        Ok(entry.workspace.clone())
    }

    /// Drop a viewer's workspace (stops its rotation clock).
    fn remove_workspace(&self, session: &AuthSession) {
        let Some(key) = session.viewer_key() else {
            return;
        };
        if let Ok(mut g) = self.workspaces.write() {
            g.remove(&key);
        }
    }

    /// Remove workspaces idle for at least `timeout`. Returns how many were removed.
    pub fn cleanup_idle(&self, timeout: Duration) -> usize {
        let mut g = match self.workspaces.write() {
            Ok(guard) => guard,
            Err(_) => return 0,
        };
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - g.len()
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.read().map(|g| g.len()).unwrap_or(0)
    }
}

fn error_response(mut builder: actix_web::HttpResponseBuilder, message: impl std::fmt::Display) -> HttpResponse {
    builder.json(serde_json::json!({ "error": message.to_string() }))
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "basketball-subs-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn serve_index() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Register every route. `Data<AppState<S>>` must be in app data.
pub fn configure<S: TeamStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .service(api_health)
        .service(favicon);
    teams::configure::<S>(cfg);
    session::configure::<S>(cfg);
    workspace::configure::<S>(cfg);
}
