//! Admin gate and lead list.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::auth;
use crate::error::WebResult;
use crate::pages;
use crate::routes::see_other;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// GET /admin/login
pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let session = Session::from_headers(&headers, &state.config.session_key);
    pages::login_page(session.language, false)
}

/// POST /admin/login - check the password and set the session flag.
///
/// A failure re-renders the login form with a notice and says nothing more
/// than "incorrect".
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut session = Session::from_headers(&headers, &state.config.session_key);

    if auth::verify_password(&form.password, &state.config.admin_password) {
        auth::authorize(&mut session);
        tracing::info!("admin login succeeded");
        return see_other("/admin/prospectos", &session, &state.config.session_key);
    }

    tracing::warn!("admin login failed");
    (
        StatusCode::UNAUTHORIZED,
        pages::login_page(session.language, true),
    )
        .into_response()
}

/// GET /admin/prospectos - full lead list, newest first.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> WebResult<Response> {
    let session = Session::from_headers(&headers, &state.config.session_key);
    if !auth::is_authorized(&session) {
        return Ok(Redirect::to("/admin/login").into_response());
    }

    let prospects = state.store.list_prospects()?;
    Ok(pages::admin_list_page(session.language, &prospects).into_response())
}

/// GET /admin/logout - clear the flag and return to the landing page.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut session = Session::from_headers(&headers, &state.config.session_key);
    auth::logout(&mut session);
    see_other("/", &session, &state.config.session_key)
}

/// POST /admin/reset - discard every record.
///
/// Only registered outside production, and still requires an authorized
/// session.
pub async fn reset(State(state): State<AppState>, headers: HeaderMap) -> WebResult<Response> {
    let session = Session::from_headers(&headers, &state.config.session_key);
    if !auth::is_authorized(&session) {
        return Ok(Redirect::to("/admin/login").into_response());
    }

    state.store.reset()?;
    Ok(Redirect::to("/admin/prospectos").into_response())
}
