use std::sync::Arc;

use anyhow::Context;
use campusbyte_config::{CorsConfig, ProvisioningConfig, StoreBackend, StoreConfig};
use campusbyte_db::{CampusStore, MemoryStore, PgStore, init_db_pool};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CampusStore>,
    pub provisioning: ProvisioningConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn CampusStore>, provisioning: ProvisioningConfig) -> Self {
        Self {
            store,
            provisioning,
            cors_config: CorsConfig::from_env(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provisioning", &self.provisioning)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Connects the configured store and loads the provisioning settings.
///
/// Postgres migrations are applied on startup.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store_config = StoreConfig::from_env();

    let store: Arc<dyn CampusStore> = match store_config.backend {
        StoreBackend::Postgres => {
            let database_url = store_config
                .database_url
                .context("DATABASE_URL must be set for the postgres store")?;
            let pool = init_db_pool(&database_url)
                .await
                .context("Failed to connect to database")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!(backend = %store_config.backend, "Store initialized");
    Ok(AppState::new(store, ProvisioningConfig::from_env()))
}
