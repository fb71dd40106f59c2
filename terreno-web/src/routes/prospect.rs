//! Lead capture form.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use terreno_core::{NewProspect, StoreError};

use crate::error::WebResult;
use crate::pages;
use crate::session::Session;
use crate::state::AppState;

/// Query parameters that prefill the form, carried by referral links
/// (e.g. a WhatsApp campaign link with `?source=whatsapp`).
#[derive(Debug, Deserialize)]
pub struct ProspectQuery {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProspectForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub source: String,
}

/// GET /prospecto - empty (or prefilled) form.
pub async fn form(
    State(state): State<AppState>,
    Query(query): Query<ProspectQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let session = Session::from_headers(&headers, &state.config.session_key);
    pages::prospect_form_page(
        session.language,
        "",
        query.phone.as_deref().unwrap_or(""),
        "",
        query.source.as_deref().unwrap_or(""),
        None,
    )
}

/// POST /prospecto - validate, record, redirect to the thank-you page.
///
/// A missing name or phone re-renders the form with a notice and the
/// submitted values; nothing is stored in that case. Storage faults bubble
/// up as a server error.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ProspectForm>,
) -> WebResult<Response> {
    let session = Session::from_headers(&headers, &state.config.session_key);

    let name = form.name.trim();
    let phone = form.phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Ok(rejected(&session, &form));
    }

    let mut input = NewProspect::new(name, phone)
        .with_language(session.language)
        .with_property_label(state.listing.label.clone());
    if !form.email.trim().is_empty() {
        input = input.with_email(form.email.trim());
    }
    if !form.source.trim().is_empty() {
        input = input.with_source(form.source.trim());
    }

    match state.store.record_prospect(input) {
        Ok(prospect) => {
            tracing::info!(id = prospect.id, source = %prospect.source, "lead captured");
            Ok(Redirect::to("/gracias").into_response())
        }
        // The store validates too; agree with it by re-rendering the form.
        Err(StoreError::Validation(_)) => Ok(rejected(&session, &form)),
        Err(StoreError::Storage(e)) => Err(e.into()),
    }
}

fn rejected(session: &Session, form: &ProspectForm) -> Response {
    let notice = pages::strings(session.language).form_missing_fields;
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        pages::prospect_form_page(
            session.language,
            form.name.trim(),
            form.phone.trim(),
            form.email.trim(),
            form.source.trim(),
            Some(notice),
        ),
    )
        .into_response()
}
