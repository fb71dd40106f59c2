//! Admin Gate
//!
//! Single shared password restricting the lead list. There is no account
//! model, no lockout, and no rate limiting: `verify_password` compares the
//! submitted value against the configured one, and a success flips the
//! session's admin flag. Logout (or cookie loss) returns the session to
//! anonymous; there is no expiry transition of its own.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::session::Session;

const INSECURE_DEFAULT_PASSWORD: &str = "admin123";

// ============================================================================
// ADMIN PASSWORD (TYPE-SAFE)
// ============================================================================

/// Configured admin password, wrapped so it is never logged.
#[derive(Clone)]
pub struct AdminPassword(SecretString);

impl AdminPassword {
    pub fn new(password: String) -> Self {
        Self(SecretString::new(password.into()))
    }

    /// Read `ADMIN_PASSWORD`, falling back to the development default.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| INSECURE_DEFAULT_PASSWORD.to_string()),
        )
    }

    /// True when the password is still the development default. Production
    /// startup refuses to run in that state.
    pub fn is_insecure_default(&self) -> bool {
        self.0.expose_secret() == INSECURE_DEFAULT_PASSWORD
    }

    fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdminPassword([REDACTED])")
    }
}

// ============================================================================
// GATE OPERATIONS
// ============================================================================

/// Check a submitted password against the configured one.
///
/// Both sides are hashed before comparison so the timing of the equality
/// check does not depend on where the submitted value diverges.
pub fn verify_password(submitted: &str, configured: &AdminPassword) -> bool {
    let submitted_digest = Sha256::digest(submitted.as_bytes());
    let configured_digest = Sha256::digest(configured.expose().as_bytes());
    submitted_digest == configured_digest
}

/// True iff the session carries a prior successful authentication.
pub fn is_authorized(session: &Session) -> bool {
    session.admin
}

/// Mark the session as authorized.
pub fn authorize(session: &mut Session) {
    session.admin = true;
}

/// Clear the authorization marker.
pub fn logout(session: &mut Session) {
    session.admin = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password() -> AdminPassword {
        AdminPassword::new("hunter2".to_string())
    }

    #[test]
    fn test_correct_password_accepted() {
        assert!(verify_password("hunter2", &password()));
    }

    #[test]
    fn test_wrong_password_rejected() {
        assert!(!verify_password("hunter", &password()));
        assert!(!verify_password("hunter22", &password()));
        assert!(!verify_password("", &password()));
        assert!(!verify_password("HUNTER2", &password()));
    }

    #[test]
    fn test_gate_state_machine() {
        let mut session = Session::default();
        assert!(!is_authorized(&session));

        authorize(&mut session);
        assert!(is_authorized(&session));

        logout(&mut session);
        assert!(!is_authorized(&session));
    }

    #[test]
    fn test_insecure_default_detection() {
        assert!(AdminPassword::new("admin123".to_string()).is_insecure_default());
        assert!(!password().is_insecure_default());
    }

    #[test]
    fn test_debug_redacted() {
        let debug = format!("{:?}", password());
        assert!(!debug.contains("hunter2"));
    }
}
