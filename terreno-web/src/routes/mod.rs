//! Route handlers, organized by page group.
//!
//! - `landing`: landing page, language switch, thank-you page
//! - `prospect`: lead capture form
//! - `admin`: login, lead list, logout (and reset outside production)
//! - `health`: liveness/readiness endpoints

pub mod admin;
pub mod health;
pub mod landing;
pub mod prospect;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::session::{Session, SessionKey};
use crate::state::AppState;

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(landing::landing))
        .route("/set_language/:lang", get(landing::set_language))
        .route("/gracias", get(landing::thanks))
        .route("/prospecto", get(prospect::form).post(prospect::submit))
        .route("/admin/login", get(admin::login_form).post(admin::login))
        .route("/admin/prospectos", get(admin::list))
        .route("/admin/logout", get(admin::logout))
        .route("/health/ping", get(health::ping))
        .route("/health/ready", get(health::readiness));

    // The reset route does not exist at all in production.
    if !state.config.is_production() {
        router = router.route("/admin/reset", post(admin::reset));
    }

    router
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 303 redirect that also writes the session cookie back.
pub(crate) fn see_other(location: &str, session: &Session, key: &SessionKey) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, session.set_cookie(key)),
        ],
    )
        .into_response()
}
