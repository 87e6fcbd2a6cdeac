use std::sync::Arc;

use users_db::{DbPool, PgUserGateway, UserGateway};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Used directly only by the health check.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Persistence gateway for the `users` table.
    pub users: Arc<dyn UserGateway>,
}

impl AppState {
    /// State backed by PostgreSQL through [`PgUserGateway`].
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            users: Arc::new(PgUserGateway::new(pool.clone())),
            pool,
            config: Arc::new(config),
        }
    }
}
