//! Web Configuration Module
//!
//! Configuration is loaded from environment variables with development
//! defaults. Production mode (`TERRENO_ENV=production`) refuses the insecure
//! defaults for the admin password and the session key, and drops the
//! store-reset route entirely.
//!
//! Environment variables:
//! - `PORT`: listen port (default: 5000)
//! - `TERRENO_BIND`: bind host (default: 0.0.0.0)
//! - `TERRENO_ENV`: "production" or anything else for development
//! - `TERRENO_DB_PATH`: SQLite file path (default: terreno.db)
//! - `TERRENO_STATIC_DIR`: static asset directory (default: static)
//! - `ADMIN_PASSWORD`: admin gate password (default: weak dev value)
//! - `SECRET_KEY`: session cookie signing key (default: weak dev value)

use std::net::SocketAddr;
use std::path::PathBuf;

use terreno_core::ConfigError;

use crate::auth::AdminPassword;
use crate::session::SessionKey;

// ============================================================================
// ENVIRONMENT
// ============================================================================

/// Deployment environment. Controls production hardening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("TERRENO_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

// ============================================================================
// WEB CONFIGURATION
// ============================================================================

/// Application configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_host: String,
    pub port: u16,
    pub environment: Environment,
    /// SQLite file holding the prospect table.
    pub db_path: PathBuf,
    /// Directory served under `/static/` (gallery images).
    pub static_dir: PathBuf,
    pub admin_password: AdminPassword,
    pub session_key: SessionKey,
}

impl WebConfig {
    /// Load configuration from the environment.
    ///
    /// Fails when `PORT` is unparseable, or when running in production with
    /// a default credential still in place.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let bind_host =
            std::env::var("TERRENO_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let port = port_str
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port_str,
                reason: "not a valid port number".to_string(),
            })?;

        let db_path = std::env::var("TERRENO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("terreno.db"));

        let static_dir = std::env::var("TERRENO_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let admin_password = AdminPassword::from_env();
        let session_key = SessionKey::from_env();

        let config = Self {
            bind_host,
            port,
            environment,
            db_path,
            static_dir,
            admin_password,
            session_key,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
            field: "TERRENO_BIND".to_string(),
            value: addr,
            reason: e.to_string(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_production() {
            if self.admin_password.is_insecure_default() {
                tracing::warn!(
                    "ADMIN_PASSWORD is the insecure default; override it before deploying"
                );
            }
            return Ok(());
        }
        if self.admin_password.is_insecure_default() {
            return Err(ConfigError::InsecureDefault {
                field: "ADMIN_PASSWORD".to_string(),
            });
        }
        if self.session_key.is_insecure_default() {
            return Err(ConfigError::InsecureDefault {
                field: "SECRET_KEY".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_config() -> WebConfig {
        WebConfig {
            bind_host: "127.0.0.1".to_string(),
            port: 5000,
            environment: Environment::Development,
            db_path: PathBuf::from("terreno.db"),
            static_dir: PathBuf::from("static"),
            admin_password: AdminPassword::new("admin123".to_string()),
            session_key: SessionKey::new("dev-secret-change-me".to_string()),
        }
    }

    #[test]
    fn test_dev_accepts_insecure_defaults() {
        let config = dev_config();
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_rejects_default_password() {
        let mut config = dev_config();
        config.environment = Environment::Production;
        config.session_key = SessionKey::new("long-random-session-key".to_string());

        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InsecureDefault {
                field: "ADMIN_PASSWORD".to_string()
            }
        );
    }

    #[test]
    fn test_production_rejects_default_session_key() {
        let mut config = dev_config();
        config.environment = Environment::Production;
        config.admin_password = AdminPassword::new("s3cure-enough".to_string());

        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InsecureDefault {
                field: "SECRET_KEY".to_string()
            }
        );
    }

    #[test]
    fn test_production_accepts_overridden_secrets() {
        let mut config = dev_config();
        config.environment = Environment::Production;
        config.admin_password = AdminPassword::new("s3cure-enough".to_string());
        config.session_key = SessionKey::new("long-random-session-key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = dev_config();
        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.port(), 5000);
    }
}
