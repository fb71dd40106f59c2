//! HTML pages.
//!
//! Rendering is deliberately minimal: small builder functions over a shared
//! layout, with a bilingual string table and an escaping helper. The page
//! content itself comes from `terreno_core::PropertyListing`.

use axum::http::StatusCode;
use axum::response::Html;
use chrono::SecondsFormat;

use terreno_core::{Language, PropertyListing, Prospect};

// ============================================================================
// STRING TABLE
// ============================================================================

/// UI strings for one language.
pub struct Strings {
    pub cta_whatsapp: &'static str,
    pub cta_form: &'static str,
    pub form_title: &'static str,
    pub label_name: &'static str,
    pub label_phone: &'static str,
    pub label_email: &'static str,
    pub form_submit: &'static str,
    pub form_missing_fields: &'static str,
    pub thanks_title: &'static str,
    pub thanks_body: &'static str,
    pub login_title: &'static str,
    pub label_password: &'static str,
    pub login_submit: &'static str,
    pub login_failed: &'static str,
    pub admin_title: &'static str,
    pub admin_empty: &'static str,
    pub admin_logout: &'static str,
    pub col_name: &'static str,
    pub col_phone: &'static str,
    pub col_email: &'static str,
    pub col_source: &'static str,
    pub col_date: &'static str,
    pub col_language: &'static str,
    pub error_title: &'static str,
    pub error_body: &'static str,
}

static ES: Strings = Strings {
    cta_whatsapp: "Escribir por WhatsApp",
    cta_form: "Quiero más información",
    form_title: "Déjanos tus datos",
    label_name: "Nombre",
    label_phone: "Teléfono",
    label_email: "Correo (opcional)",
    form_submit: "Enviar",
    form_missing_fields: "Nombre y teléfono son obligatorios.",
    thanks_title: "¡Gracias!",
    thanks_body: "Recibimos tus datos, te contactaremos pronto.",
    login_title: "Acceso administrador",
    label_password: "Contraseña",
    login_submit: "Entrar",
    login_failed: "Contraseña incorrecta.",
    admin_title: "Prospectos",
    admin_empty: "Aún no hay prospectos.",
    admin_logout: "Salir",
    col_name: "Nombre",
    col_phone: "Teléfono",
    col_email: "Correo",
    col_source: "Fuente",
    col_date: "Fecha",
    col_language: "Idioma",
    error_title: "Algo salió mal",
    error_body: "Inténtalo de nuevo en unos minutos.",
};

static EN: Strings = Strings {
    cta_whatsapp: "Chat on WhatsApp",
    cta_form: "I want more information",
    form_title: "Leave us your details",
    label_name: "Name",
    label_phone: "Phone",
    label_email: "Email (optional)",
    form_submit: "Send",
    form_missing_fields: "Name and phone are required.",
    thanks_title: "Thank you!",
    thanks_body: "We received your details and will contact you soon.",
    login_title: "Admin access",
    label_password: "Password",
    login_submit: "Sign in",
    login_failed: "Incorrect password.",
    admin_title: "Prospects",
    admin_empty: "No prospects yet.",
    admin_logout: "Log out",
    col_name: "Name",
    col_phone: "Phone",
    col_email: "Email",
    col_source: "Source",
    col_date: "Date",
    col_language: "Language",
    error_title: "Something went wrong",
    error_body: "Please try again in a few minutes.",
};

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::Es => &ES,
        Language::En => &EN,
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Escape text for HTML body and attribute positions.
pub fn esc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(language: Language, title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/set_language/es\">ES</a> | <a href=\"/set_language/en\">EN</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        lang = language.as_str(),
        title = esc(title),
        body = body,
    ))
}

// ============================================================================
// VISITOR PAGES
// ============================================================================

pub fn landing_page(language: Language, listing: &PropertyListing) -> Html<String> {
    let s = strings(language);
    let copy = listing.copy(language);

    let gallery: String = listing
        .images
        .iter()
        .map(|img| format!("<img src=\"/static/{}\" alt=\"\" width=\"320\">\n", esc(img)))
        .collect();

    let body = format!(
        "<h1>{title}</h1>\n\
         <p>{description}</p>\n\
         <p><strong>{price}</strong></p>\n\
         {gallery}\
         <p><a href=\"{wa}\">{cta_wa}</a></p>\n\
         <p><a href=\"/prospecto\">{cta_form}</a></p>\n",
        title = esc(&copy.title),
        description = esc(&copy.description),
        price = esc(&listing.price),
        gallery = gallery,
        wa = esc(&listing.whatsapp_link(language)),
        cta_wa = s.cta_whatsapp,
        cta_form = s.cta_form,
    );
    layout(language, &copy.title, &body)
}

/// Lead capture form. `notice` is the validation message when re-rendering
/// after a rejected submission; submitted values are preserved.
pub fn prospect_form_page(
    language: Language,
    name: &str,
    phone: &str,
    email: &str,
    source: &str,
    notice: Option<&str>,
) -> Html<String> {
    let s = strings(language);
    let notice_html = notice
        .map(|n| format!("<p class=\"error\">{}</p>\n", esc(n)))
        .unwrap_or_default();

    let body = format!(
        "<h1>{title}</h1>\n\
         {notice}\
         <form method=\"post\" action=\"/prospecto\">\n\
         <label>{l_name} <input name=\"name\" value=\"{name}\"></label><br>\n\
         <label>{l_phone} <input name=\"phone\" value=\"{phone}\"></label><br>\n\
         <label>{l_email} <input name=\"email\" value=\"{email}\"></label><br>\n\
         <input type=\"hidden\" name=\"source\" value=\"{source}\">\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n",
        title = s.form_title,
        notice = notice_html,
        l_name = s.label_name,
        name = esc(name),
        l_phone = s.label_phone,
        phone = esc(phone),
        l_email = s.label_email,
        email = esc(email),
        source = esc(source),
        submit = s.form_submit,
    );
    layout(language, s.form_title, &body)
}

pub fn thanks_page(language: Language) -> Html<String> {
    let s = strings(language);
    let body = format!(
        "<h1>{title}</h1>\n<p>{body}</p>\n<p><a href=\"/\">&larr;</a></p>\n",
        title = s.thanks_title,
        body = s.thanks_body,
    );
    layout(language, s.thanks_title, &body)
}

// ============================================================================
// ADMIN PAGES
// ============================================================================

pub fn login_page(language: Language, failed: bool) -> Html<String> {
    let s = strings(language);
    let notice = if failed {
        format!("<p class=\"error\">{}</p>\n", s.login_failed)
    } else {
        String::new()
    };

    let body = format!(
        "<h1>{title}</h1>\n\
         {notice}\
         <form method=\"post\" action=\"/admin/login\">\n\
         <label>{l_password} <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n",
        title = s.login_title,
        notice = notice,
        l_password = s.label_password,
        submit = s.login_submit,
    );
    layout(language, s.login_title, &body)
}

pub fn admin_list_page(language: Language, prospects: &[Prospect]) -> Html<String> {
    let s = strings(language);

    let table = if prospects.is_empty() {
        format!("<p>{}</p>\n", s.admin_empty)
    } else {
        let rows: String = prospects
            .iter()
            .map(|p| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    p.id,
                    esc(&p.name),
                    esc(&p.phone),
                    esc(p.email.as_deref().unwrap_or("-")),
                    esc(&p.source),
                    p.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                    p.language.as_str(),
                )
            })
            .collect();
        format!(
            "<table border=\"1\">\n\
             <tr><th>#</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>\n\
             {}\
             </table>\n",
            s.col_name, s.col_phone, s.col_email, s.col_source, s.col_date, s.col_language, rows,
        )
    };

    let body = format!(
        "<h1>{title} ({count})</h1>\n\
         {table}\
         <p><a href=\"/admin/logout\">{logout}</a></p>\n",
        title = s.admin_title,
        count = prospects.len(),
        table = table,
        logout = s.admin_logout,
    );
    layout(language, s.admin_title, &body)
}

// ============================================================================
// ERROR PAGE
// ============================================================================

/// Generic error page; bilingual since the failing request may not have a
/// usable session.
pub fn error_page(status: StatusCode) -> Html<String> {
    let body = format!(
        "<h1>{status}</h1>\n<p>{es}</p>\n<p>{en}</p>\n",
        status = status.as_u16(),
        es = ES.error_body,
        en = EN.error_body,
    );
    layout(Language::Es, ES.error_title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc_neutralizes_markup() {
        assert_eq!(
            esc("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(esc("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn test_landing_page_localized() {
        let listing = PropertyListing::monterrico();
        let es = landing_page(Language::Es, &listing).0;
        assert!(es.contains("Terrenos en Monterrico"));
        assert!(es.contains("wa.me/50244851125"));

        let en = landing_page(Language::En, &listing).0;
        assert!(en.contains("Lots in Monterrico"));
        assert!(en.contains("lang=\"en\""));
    }

    #[test]
    fn test_form_preserves_submitted_values() {
        let html =
            prospect_form_page(Language::Es, "Ana", "502", "", "whatsapp", Some("falta algo")).0;
        assert!(html.contains("value=\"Ana\""));
        assert!(html.contains("value=\"whatsapp\""));
        assert!(html.contains("falta algo"));
    }

    #[test]
    fn test_admin_list_escapes_names() {
        let prospect = Prospect {
            id: 1,
            name: "<b>Ana</b>".to_string(),
            email: None,
            phone: "502".to_string(),
            source: "direct".to_string(),
            created_at: chrono::Utc::now(),
            property_label: "monterrico-lotes".to_string(),
            language: Language::Es,
        };
        let html = admin_list_page(Language::Es, &[prospect]).0;
        assert!(html.contains("&lt;b&gt;Ana&lt;/b&gt;"));
        assert!(!html.contains("<b>Ana</b>"));
    }

    #[test]
    fn test_admin_list_empty_state() {
        let html = admin_list_page(Language::En, &[]).0;
        assert!(html.contains("No prospects yet."));
    }

    #[test]
    fn test_login_page_failure_notice() {
        assert!(!login_page(Language::Es, false).0.contains("incorrecta"));
        assert!(login_page(Language::Es, true).0.contains("incorrecta"));
    }
}
