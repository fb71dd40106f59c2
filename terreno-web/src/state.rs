//! Shared application state for the Axum router.

use std::sync::Arc;
use std::time::Instant;

use terreno_core::PropertyListing;
use terreno_storage::ProspectStore;

use crate::config::WebConfig;

/// Application-wide state shared across all routes.
///
/// Built once at startup; the store handle and configuration are behind
/// `Arc` so cloning per request stays cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProspectStore>,
    pub listing: Arc<PropertyListing>,
    pub config: Arc<WebConfig>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: ProspectStore, listing: PropertyListing, config: WebConfig) -> Self {
        Self {
            store: Arc::new(store),
            listing: Arc::new(listing),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
