//! `POST /api/teams` and `POST /api/teams/submit`: insert a team record.
//!
//! 200 `{ success: true, teams: [...] }` on success, 500 `{ error }` with the
//! store's message on store failure, and 500 `{ error: "Internal server error" }`
//! when the body cannot be read.

use super::{error_response, AppState};
use crate::models::{NewTeam, Team};
use crate::store::TeamStore;
use actix_web::{
    error::{InternalError, JsonPayloadError},
    web::{self, Data, Json},
    HttpRequest, HttpResponse,
};
use serde::Serialize;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
struct InsertTeamResponse {
    success: bool,
    teams: Vec<Team>,
}

async fn api_insert_team<S: TeamStore + 'static>(state: Data<AppState<S>>, body: Json<NewTeam>) -> HttpResponse {
    let team = body.into_inner();
    log::info!("Inserting team {} with {} player(s)", team.team_name, team.players.len());
    match state.store.insert_team(team).await {
        Ok(teams) => HttpResponse::Ok().json(InsertTeamResponse { success: true, teams }),
        Err(e) => {
            log::error!("Store error: {}", e);
            error_response(HttpResponse::InternalServerError(), e)
        }
    }
}

fn unreadable_body(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::error!("Internal server error: {}", err);
    InternalError::from_response(
        err,
        error_response(HttpResponse::InternalServerError(), INTERNAL_ERROR_MESSAGE),
    )
    .into()
}

pub(super) fn configure<S: TeamStore + 'static>(cfg: &mut web::ServiceConfig) {
    for path in ["/api/teams", "/api/teams/submit"] {
        cfg.service(
            web::resource(path)
                .app_data(web::JsonConfig::default().error_handler(unreadable_body))
                .route(web::post().to(api_insert_team::<S>)),
        );
    }
}
