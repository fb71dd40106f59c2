//! TERRENO Web - HTTP surface for the landing application
//!
//! This crate exposes the bilingual landing page, the prospect capture form,
//! and the password-gated admin list over Axum. Per-request state (language
//! choice, admin flag) travels in a signed session cookie; captured leads go
//! through the `terreno-storage` prospect store.

pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

pub use auth::{verify_password, AdminPassword};
pub use config::{Environment, WebConfig};
pub use error::{WebError, WebResult};
pub use routes::create_router;
pub use session::{Session, SessionKey, SESSION_COOKIE};
pub use state::AppState;
