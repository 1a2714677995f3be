//! Signed-in routes: view, gallery, selection, roster edits and rotation controls.
//! Every mutation answers with the refreshed view.

use super::session::current_session;
use super::{error_response, AppState};
use crate::logic::{RosterError, ViewModel, Workspace, WorkspaceError};
use crate::models::{PlayerId, TeamId};
use crate::store::TeamStore;
use actix_session::Session;
use actix_web::{
    web::{self, Data, Json, Path},
    HttpResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Deserialize)]
struct CreateTeamBody {
    team_name: String,
    /// Comma-separated player names.
    #[serde(default)]
    players: String,
}

#[derive(Deserialize)]
struct SelectTeamBody {
    #[serde(default)]
    team_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct ReorderBody {
    from: usize,
    to: usize,
}

fn workspace_error(e: &WorkspaceError) -> HttpResponse {
    let builder = match e {
        WorkspaceError::NoTeamSelected => HttpResponse::Conflict(),
        WorkspaceError::TeamNotFound(_) => HttpResponse::NotFound(),
        WorkspaceError::Roster(RosterError::IndexOutOfRange { .. }) => HttpResponse::BadRequest(),
        WorkspaceError::Store(_) | WorkspaceError::Roster(RosterError::Store(_)) => {
            HttpResponse::InternalServerError()
        }
    };
    error_response(builder, e)
}

/// Workspace of the signed-in viewer, or the 401 to return.
fn open<S: TeamStore>(state: &AppState<S>, session: &Session) -> Result<Arc<Mutex<Workspace>>, HttpResponse> {
    let auth = current_session(session)
        .ok_or_else(|| error_response(HttpResponse::Unauthorized(), "Not signed in"))?;
    state.workspace_for(&auth)
}

fn view_or_error(ws: &Workspace, result: Result<(), WorkspaceError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(ws.view()),
        Err(e) => workspace_error(&e),
    }
}

/// Current screen. Signed out gets the sign-in screen rather than a 401.
async fn api_view<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    if current_session(&session).is_none() {
        return HttpResponse::Ok().json(ViewModel::sign_in());
    }
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let ws = ws.lock().await;
    HttpResponse::Ok().json(ws.view())
}

/// Reload the gallery from the store.
async fn api_list_teams<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    ws.refresh_gallery(&state.store).await;
    HttpResponse::Ok().json(ws.view())
}

async fn api_create_team<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    session: Session,
    body: Json<CreateTeamBody>,
) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    let result = ws
        .create_team(&state.store, &body.team_name, &body.players)
        .await
        .map(|_| ());
    view_or_error(&ws, result)
}

async fn api_delete_team<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    session: Session,
    path: Path<TeamId>,
) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    let result = ws.delete_team(&state.store, path.into_inner()).await;
    view_or_error(&ws, result)
}

/// Select a team (`team_id: null` goes back to the gallery).
async fn api_select_team<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    session: Session,
    body: Json<SelectTeamBody>,
) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    let result = ws.select_team(&state.store, body.team_id).await;
    view_or_error(&ws, result)
}

async fn api_add_player<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    session: Session,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    let result = ws.add_player(&state.store, &body.name).await.map(|_| ());
    view_or_error(&ws, result)
}

async fn api_remove_player<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    session: Session,
    path: Path<PlayerId>,
) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    let result = ws.remove_player(&state.store, &path.into_inner()).await;
    view_or_error(&ws, result)
}

async fn api_reorder<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    session: Session,
    body: Json<ReorderBody>,
) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let mut ws = ws.lock().await;
    let result = ws.reorder(&state.store, body.from, body.to).await;
    view_or_error(&ws, result)
}

async fn api_get_rotation<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let ws = ws.lock().await;
    HttpResponse::Ok().json(ws.rotation())
}

async fn api_start_rotation<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let ws = ws.lock().await;
    let result = ws.start_rotation().await.map(|_| ());
    view_or_error(&ws, result)
}

async fn api_pause_rotation<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let ws = ws.lock().await;
    let result = ws.pause_rotation().await.map(|_| ());
    view_or_error(&ws, result)
}

async fn api_reset_rotation<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    let ws = match open(&state, &session) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    let ws = ws.lock().await;
    ws.reset_rotation().await;
    HttpResponse::Ok().json(ws.view())
}

pub(super) fn configure<S: TeamStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/view").route(web::get().to(api_view::<S>)))
        .service(
            web::resource("/api/gallery")
                .route(web::get().to(api_list_teams::<S>))
                .route(web::post().to(api_create_team::<S>)),
        )
        .service(web::resource("/api/gallery/{id}").route(web::delete().to(api_delete_team::<S>)))
        .service(web::resource("/api/selection").route(web::put().to(api_select_team::<S>)))
        .service(web::resource("/api/roster/players").route(web::post().to(api_add_player::<S>)))
        .service(
            web::resource("/api/roster/players/{player_id}")
                .route(web::delete().to(api_remove_player::<S>)),
        )
        .service(web::resource("/api/roster/order").route(web::put().to(api_reorder::<S>)))
        .service(web::resource("/api/rotation").route(web::get().to(api_get_rotation::<S>)))
        .service(web::resource("/api/rotation/start").route(web::post().to(api_start_rotation::<S>)))
        .service(web::resource("/api/rotation/pause").route(web::post().to(api_pause_rotation::<S>)))
        .service(web::resource("/api/rotation/reset").route(web::post().to(api_reset_rotation::<S>)));
}
