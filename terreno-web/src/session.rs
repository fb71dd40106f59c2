//! Signed cookie session.
//!
//! Per-browser state is two fields: the language choice and the admin flag.
//! Both travel in one cookie whose value is `base64url(json)` followed by an
//! HMAC-SHA256 tag keyed by `SECRET_KEY`. A missing, malformed, or tampered
//! cookie yields a fresh default session rather than an error; the session
//! mechanism carries preferences, it does not authenticate requests by
//! itself (the admin flag only means a prior password check succeeded).

use axum::http::header::{HeaderMap, COOKIE};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use terreno_core::Language;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "terreno_session";

const INSECURE_DEFAULT_KEY: &str = "dev-secret-change-me";

// ============================================================================
// SESSION KEY (TYPE-SAFE)
// ============================================================================

/// Signing key for the session cookie, wrapped so it is never logged.
#[derive(Clone)]
pub struct SessionKey(SecretString);

impl SessionKey {
    pub fn new(key: String) -> Self {
        Self(SecretString::new(key.into()))
    }

    /// Read `SECRET_KEY`, falling back to the development default.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("SECRET_KEY").unwrap_or_else(|_| INSECURE_DEFAULT_KEY.to_string()),
        )
    }

    /// True when the key is still the development default. Production
    /// startup refuses to run in that state.
    pub fn is_insecure_default(&self) -> bool {
        self.0.expose_secret() == INSECURE_DEFAULT_KEY
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.0.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length")
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey([REDACTED])")
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Per-browser session state, parsed once per request and passed explicitly
/// to whatever needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Visitor language; Spanish for a fresh session.
    #[serde(default)]
    pub language: Language,
    /// Set by a successful admin login, cleared by logout.
    #[serde(default)]
    pub admin: bool,
}

impl Session {
    /// Parse the session out of the request headers. Anything that fails
    /// verification comes back as the default session.
    pub fn from_headers(headers: &HeaderMap, key: &SessionKey) -> Self {
        cookie_value(headers, SESSION_COOKIE)
            .and_then(|value| Self::decode(value, key))
            .unwrap_or_default()
    }

    /// Language preference; only `es`/`en` are recognized, anything else is
    /// silently ignored.
    pub fn set_language(&mut self, tag: &str) {
        if let Some(language) = Language::parse(tag) {
            self.language = language;
        }
    }

    /// Serialize and sign the session into a cookie value.
    pub fn encode(&self, key: &SessionKey) -> String {
        let payload = serde_json::to_vec(self).expect("session serializes to JSON");
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = key.mac();
        mac.update(payload_b64.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{payload_b64}.{tag}")
    }

    /// Verify and deserialize a cookie value. `None` on any mismatch.
    pub fn decode(value: &str, key: &SessionKey) -> Option<Self> {
        let (payload_b64, tag_b64) = value.split_once('.')?;
        let tag = URL_SAFE_NO_PAD.decode(tag_b64).ok()?;

        let mut mac = key.mac();
        mac.update(payload_b64.as_bytes());
        // Constant-time comparison of the tag.
        mac.verify_slice(&tag).ok()?;

        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    /// Full `Set-Cookie` header value for this session.
    pub fn set_cookie(&self, key: &SessionKey) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.encode(key)
        )
    }
}

/// Find a cookie by name in the `Cookie` header.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn key() -> SessionKey {
        SessionKey::new("test-session-key".to_string())
    }

    #[test]
    fn test_round_trip() {
        let session = Session {
            language: Language::En,
            admin: true,
        };
        let encoded = session.encode(&key());
        assert_eq!(Session::decode(&encoded, &key()), Some(session));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let session = Session::default();
        let encoded = session.encode(&key());
        let (payload, tag) = encoded.split_once('.').unwrap();

        let forged_payload =
            URL_SAFE_NO_PAD.encode(br#"{"language":"es","admin":true}"#);
        let forged = format!("{forged_payload}.{tag}");
        assert_eq!(Session::decode(&forged, &key()), None);

        // Unmodified halves still verify.
        assert!(Session::decode(&format!("{payload}.{tag}"), &key()).is_some());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let encoded = Session::default().encode(&key());
        let other = SessionKey::new("another-key".to_string());
        assert_eq!(Session::decode(&encoded, &other), None);
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(Session::decode("", &key()), None);
        assert_eq!(Session::decode("no-dot-here", &key()), None);
        assert_eq!(Session::decode("a.b", &key()), None);
    }

    #[test]
    fn test_missing_cookie_yields_default() {
        let headers = HeaderMap::new();
        let session = Session::from_headers(&headers, &key());
        assert_eq!(session, Session::default());
        assert_eq!(session.language, Language::Es);
        assert!(!session.admin);
    }

    #[test]
    fn test_from_headers_finds_cookie_among_others() {
        let session = Session {
            language: Language::En,
            admin: false,
        };
        let mut headers = HeaderMap::new();
        let cookie = format!(
            "other=1; {}={}; trailing=2",
            SESSION_COOKIE,
            session.encode(&key())
        );
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());
        assert_eq!(Session::from_headers(&headers, &key()), session);
    }

    #[test]
    fn test_set_language_ignores_unknown() {
        let mut session = Session {
            language: Language::En,
            admin: false,
        };
        session.set_language("fr");
        assert_eq!(session.language, Language::En);
        session.set_language("es");
        assert_eq!(session.language, Language::Es);
    }

    #[test]
    fn test_session_key_debug_redacted() {
        let debug = format!("{:?}", key());
        assert!(!debug.contains("test-session-key"));
        assert!(debug.contains("REDACTED"));
    }
}
