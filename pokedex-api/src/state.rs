//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use pokedex_storage::KeyValueCache;

use crate::services::NameIndexService;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Search and ability lookups.
    pub index: NameIndexService,
    /// The cache the index is mirrored into, for readiness probes.
    pub cache: Arc<dyn KeyValueCache>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(index: NameIndexService, cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            index,
            cache,
            start_time: Instant::now(),
        }
    }
}

// Use macro to reduce boilerplate for FromRef implementations
crate::impl_from_ref!(NameIndexService, index);
crate::impl_from_ref!(Arc<dyn KeyValueCache>, cache);
crate::impl_from_ref!(Instant, start_time);
