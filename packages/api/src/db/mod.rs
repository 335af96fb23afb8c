//! # Database module — PostgreSQL-backed stores
//!
//! Production implementations of the [`store::FruitStore`] and [`store::UserStore`]
//! traits, plus the helpers the binary uses to open the pool and apply migrations.
//!
//! ## Design
//!
//! The pool is created once by the binary from [`crate::config::Settings`] and
//! cloned into each store; `PgPool` is a cheap handle over a shared pool. Queries
//! are checked at runtime (`query_as` with explicit column lists), so building the
//! workspace never needs a live database.
//!
//! Rows are read into private `FromRow` structs and converted into the store crate's
//! models, keeping `sqlx` out of the `store` crate.
//!
//! ## Re-exports
//!
//! - [`connect`] — opens a pool with the configured connection limit.
//! - [`migrate`] — applies the embedded migrations in `migrations/`.
//! - [`PgFruitStore`], [`PgUserStore`] — the two store implementations.

mod fruits;
mod users;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Settings;

pub use fruits::PgFruitStore;
pub use users::PgUserStore;

/// Open the connection pool described by `settings`.
pub async fn connect(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await
}

/// Apply the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
