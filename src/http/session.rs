//! Identity session.
//!
//! OAuth with the providers lives outside this binary, in the auth proxy that
//! fronts it and serves `/auth/signin/{provider}`. After the round trip the
//! proxy forwards `POST /api/session` with the profile and the shared
//! `X-Auth-Callback-Secret` header, then relays the session cookie back to
//! the browser. The profile is kept in the cookie session until sign-out.

use super::{error_response, AppState};
use crate::models::AuthSession;
use crate::store::TeamStore;
use actix_session::Session;
use actix_web::{
    web::{self, Data, Json},
    HttpRequest, HttpResponse,
};

/// Cookie session key holding the `AuthSession`.
pub const SESSION_KEY: &str = "auth";

/// Header carrying the shared callback secret on sign-in.
pub const CALLBACK_SECRET_HEADER: &str = "X-Auth-Callback-Secret";

/// Signed-in session, or `None` when signed out (or the cookie is unreadable).
pub(super) fn current_session(session: &Session) -> Option<AuthSession> {
    match session.get::<AuthSession>(SESSION_KEY) {
        Ok(auth) => auth,
        Err(e) => {
            log::warn!("Unreadable session cookie: {}", e);
            None
        }
    }
}

/// `null` when signed out, otherwise `{ user: { name, email, image } }`.
async fn api_get_session(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(current_session(&session))
}

/// `None` when the request carries the configured callback secret.
fn reject_caller<S>(state: &AppState<S>, req: &HttpRequest) -> Option<HttpResponse> {
    let Some(expected) = state.callback_secret.as_deref() else {
        log::warn!("Sign-in refused: AUTH_CALLBACK_SECRET is not configured");
        return Some(error_response(HttpResponse::ServiceUnavailable(), "Sign-in is not configured"));
    };
    let presented = req
        .headers()
        .get(CALLBACK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected) {
        log::warn!("Sign-in refused: bad callback secret");
        return Some(error_response(HttpResponse::Unauthorized(), "Invalid callback secret"));
    }
    None
}

async fn api_sign_in<S: TeamStore + 'static>(
    state: Data<AppState<S>>,
    req: HttpRequest,
    session: Session,
    body: Json<AuthSession>,
) -> HttpResponse {
    if let Some(resp) = reject_caller(&state, &req) {
        return resp;
    }
    let auth = body.into_inner();
    if auth.viewer_key().is_none() {
        return error_response(HttpResponse::BadRequest(), "Profile needs an email or a name");
    }
    if let Err(e) = session.insert(SESSION_KEY, &auth) {
        log::error!("Failed to store session: {}", e);
        return error_response(HttpResponse::InternalServerError(), "Failed to store session");
    }
    session.renew();

    let ws = match state.workspace_for(&auth) {
        Ok(ws) => ws,
        Err(resp) => return resp,
    };
    ws.lock().await.set_session(auth.clone());
    log::info!("Signed in {:?}", auth.user.email.as_deref().or(auth.user.name.as_deref()));
    HttpResponse::Ok().json(auth)
}

async fn api_sign_out<S: TeamStore + 'static>(state: Data<AppState<S>>, session: Session) -> HttpResponse {
    if let Some(auth) = current_session(&session) {
        state.remove_workspace(&auth);
    }
    session.purge();
    HttpResponse::Ok().json(Option::<AuthSession>::None)
}

pub(super) fn configure<S: TeamStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/session")
            .route(web::get().to(api_get_session))
            .route(web::post().to(api_sign_in::<S>))
            .route(web::delete().to(api_sign_out::<S>)),
    );
}
