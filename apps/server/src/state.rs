//! Shared application state handed to every handler

use crate::{
    config::{Config, StorageBackend},
    db::{self, DirectoryStore, InMemoryDirectoryStore, PostgresDirectoryStore},
    services::{DashboardService, DirectoryService, RecommendationService},
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DirectoryStore>,
    pub directory: Arc<DirectoryService>,
    pub recommendations: Arc<RecommendationService>,
    pub dashboard: Arc<DashboardService>,
    /// Present only for the postgres backend
    pub db_pool: Option<PgPool>,
}

#[derive(Debug, Clone, Copy)]
pub struct AppStateOptions {
    pub run_migrations: bool,
}

impl AppStateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            run_migrations: config.database.run_migrations,
        }
    }
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let options = AppStateOptions::from_config(&config);
        Self::new_with_options(config, options).await
    }

    /// Build state for the configured storage backend
    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory directory store");
                Ok(Self::with_store(config, Arc::new(InMemoryDirectoryStore::new())))
            }
            StorageBackend::Postgres => {
                tracing::info!(
                    pool_max_size = config.database.pool_max_size,
                    "Connecting to PostgreSQL"
                );
                let pool = db::connect_pool(&config.database).await?;

                if options.run_migrations {
                    tracing::info!("Running database migrations");
                    db::run_migrations(&pool).await?;
                }

                let store = Arc::new(PostgresDirectoryStore::new(pool.clone()));
                let mut state = Self::with_store(config, store);
                state.db_pool = Some(pool);
                Ok(state)
            }
        }
    }

    /// Wire services around an existing store
    pub fn with_store(config: Config, store: Arc<dyn DirectoryStore>) -> Self {
        let directory = Arc::new(DirectoryService::new(store.clone()));
        let recommendations = Arc::new(RecommendationService::new(
            store.clone(),
            config.recommendation.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(store.clone()));

        Self {
            config: Arc::new(config),
            store,
            directory,
            recommendations,
            dashboard,
            db_pool: None,
        }
    }
}
