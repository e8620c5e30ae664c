#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod bicycle_ops;
mod dock_ops;
mod mappers;
mod station_ops;
mod store_impl;

#[cfg(test)]
mod lifecycle_behaviors;

use crate::error::{FleetError, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Postgres-backed equipment store. Cheap to clone; all clones share the
/// underlying pool.
#[derive(Clone)]
pub struct EquipmentDb {
    pool: PgPool,
}

impl EquipmentDb {
    /// # Errors
    /// Returns [`FleetError::Database`] when the connection cannot be
    /// established.
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::new_with_timeout(database_url, None).await
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when the connection cannot be
    /// established.
    pub async fn new_with_timeout(database_url: &str, timeout_ms: Option<u64>) -> Result<Self> {
        let connect_timeout = Duration::from_millis(timeout_ms.unwrap_or(3_000));
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|error| {
                FleetError::Database(format!("Failed to connect to database: {error}"))
            })?;
        info!("Connected to PostgreSQL fleet database");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (for testing).
    #[must_use]
    pub const fn new_with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}
