use std::sync::Arc;

use parky_db::{ParkStore, StoreHealth, TrailStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Park persistence.
    pub parks: Arc<dyn ParkStore>,
    /// Trail persistence.
    pub trails: Arc<dyn TrailStore>,
    /// Store liveness probe used by the health route.
    pub health: Arc<dyn StoreHealth>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around a single store implementing every persistence trait.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: ParkStore + TrailStore + StoreHealth + 'static,
    {
        Self {
            parks: store.clone(),
            trails: store.clone(),
            health: store,
            config: Arc::new(config),
        }
    }
}
