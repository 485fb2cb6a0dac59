//! Shared application state for all routes.

use crate::config::ServerConfig;
use crate::model::Resource;
use crate::service::Repository;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ServerConfig) -> Self {
        AppState {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn repo<T: Resource>(&self) -> Repository<'_, T> {
        Repository::new(&self.pool)
    }
}
