use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::Repositories;

/// Shared server state
///
/// Cheap to clone: the pool, repositories and token service are all
/// reference counted. Every handler reaches storage through `repos`.
///
/// # Example
///
/// ```ignore
/// let state = ServerState::initialize(&config).await?;
/// let menus = state.repos.menus.find_all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Connection pool and operation budget
    pub db: DbService,
    /// Entity repositories, built once
    pub repos: Repositories,
    /// Token service (Arc shared)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let repos = Repositories::new(db.clone());
        Self {
            config,
            db,
            repos,
            jwt_service,
        }
    }

    /// Open the database named by the configuration and build the state
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::connect(&config.database_url, config.db_operation_timeout).await?;
        Ok(Self::new(config.clone(), db))
    }

    /// State over a private in-memory database
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory(config.db_operation_timeout).await?;
        Ok(Self::new(config, db))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
