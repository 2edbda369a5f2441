//! Helpers behind `campusbyte-cli`.

use anyhow::Context;
use campusbyte_config::ProvisioningConfig;
use campusbyte_core::AppError;
use campusbyte_db::{PgPool, PgStore, init_db_pool};
use campusbyte_models::users::{AdminAccount, AdminProfileDto};
use validator::Validate;

use crate::modules::users::service::UserService;

pub async fn connect(database_url: Option<String>) -> anyhow::Result<PgPool> {
    let database_url = database_url.context("DATABASE_URL must be set")?;
    init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")
}

/// Provisions an admin account directly against Postgres.
pub async fn create_admin(
    pool: PgPool,
    config: &ProvisioningConfig,
    password: Option<&str>,
    profile: AdminProfileDto,
) -> Result<AdminAccount, AppError> {
    profile
        .validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("{}", e)))?;

    let store = PgStore::new(pool);
    UserService::create_admin(&store, config, password, profile).await
}
