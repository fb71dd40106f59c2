//! Landing page, language switch and thank-you page.

use axum::extract::{Path, State};
use axum::http::header::REFERER;
use axum::http::HeaderMap;
use axum::response::{Html, Response};

use crate::pages;
use crate::routes::see_other;
use crate::session::Session;
use crate::state::AppState;

/// GET / - property page in the session language.
pub async fn landing(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let session = Session::from_headers(&headers, &state.config.session_key);
    pages::landing_page(session.language, &state.listing)
}

/// GET /set_language/{lang} - persist the choice and bounce back.
///
/// Unrecognized tags leave the session unchanged; the redirect happens
/// either way.
pub async fn set_language(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut session = Session::from_headers(&headers, &state.config.session_key);
    session.set_language(&lang);

    let back = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/");
    see_other(back, &session, &state.config.session_key)
}

/// GET /gracias - confirmation after a successful submission.
pub async fn thanks(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let session = Session::from_headers(&headers, &state.config.session_key);
    pages::thanks_page(session.language)
}
