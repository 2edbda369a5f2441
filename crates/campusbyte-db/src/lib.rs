//! # Campusbyte DB
//!
//! Persistence for the Campusbyte API.
//!
//! - [`repository`]: the store traits the application is written against
//! - [`lookup`]: single-record lookups answered through [`FindOne`]
//! - [`postgres`]: [`PgStore`], backed by SQLx and PostgreSQL
//! - [`memory`]: [`MemoryStore`], an in-process store for tests and local runs
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use campusbyte_db::{CampusStore, PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store: Arc<dyn CampusStore> = Arc::new(PgStore::new(pool));
//! ```

pub mod error;
pub mod lookup;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use lookup::{ById, EligibleFaculty, Entity, FindOne, Lookup, OfferingSlot, OpenRegistration};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{
    AccountStore, AccountTransaction, CampusStore, CatalogStore, OfferedCourseStore, ScheduleKey,
    ScheduleQuery, ScheduleWrite,
};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool to `database_url`.
pub async fn init_db_pool(database_url: &str) -> RepositoryResult<PgPool> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| RepositoryError::Connection(e.to_string()))
}
