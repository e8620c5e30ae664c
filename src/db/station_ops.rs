#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::mappers::{parse_station, StationRow};
use super::EquipmentDb;
use crate::domain::{Station, StationId};
use crate::error::{FleetError, Result};

/// Row update usable both on the pool and inside a transaction.
pub(crate) async fn update_station_on<'e, E>(executor: E, station: &Station) -> Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    let id = station
        .id()
        .ok_or_else(|| FleetError::Internal("station has no id to update".to_string()))?;
    let result = sqlx::query("UPDATE totem SET localizacao = $2, descricao = $3 WHERE id = $1")
        .bind(id.value())
        .bind(station.location())
        .bind(station.description())
        .execute(executor)
        .await
        .map_err(|error| FleetError::Database(format!("Failed to update station: {error}")))?;

    if result.rows_affected() == 0 {
        return Err(FleetError::NotFound("station not found".to_string()));
    }
    Ok(())
}

impl EquipmentDb {
    /// # Errors
    /// Returns [`FleetError::Database`] when the query fails.
    pub async fn fetch_station(&self, id: StationId) -> Result<Option<Station>> {
        sqlx::query_as::<_, StationRow>("SELECT id, localizacao, descricao FROM totem WHERE id = $1")
            .bind(id.value())
            .fetch_optional(self.pool())
            .await
            .map_err(|error| FleetError::Database(format!("Failed to load station: {error}")))
            .map(|row| row.map(parse_station))
    }

    /// Inserts the row and hands back the entity with its assigned id.
    ///
    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails.
    pub async fn create_station(&self, mut station: Station) -> Result<Station> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO totem (localizacao, descricao) VALUES ($1, $2) RETURNING id",
        )
        .bind(station.location())
        .bind(station.description())
        .fetch_one(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to insert station: {error}")))?;

        station.set_id(StationId::new(id));
        Ok(station)
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails and
    /// [`FleetError::NotFound`] when the row no longer exists.
    pub async fn update_station(&self, station: &Station) -> Result<()> {
        update_station_on(self.pool(), station).await
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails.
    pub async fn remove_station(&self, id: StationId) -> Result<()> {
        sqlx::query("DELETE FROM totem WHERE id = $1")
            .bind(id.value())
            .execute(self.pool())
            .await
            .map_err(|error| FleetError::Database(format!("Failed to delete station: {error}")))?;
        Ok(())
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when the query fails.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>> {
        sqlx::query_as::<_, StationRow>(
            "SELECT id, localizacao, descricao FROM totem ORDER BY id ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to load stations: {error}")))
        .map(|rows| rows.into_iter().map(parse_station).collect())
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when the query fails.
    pub async fn has_station(&self, id: StationId) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM totem WHERE id = $1)")
            .bind(id.value())
            .fetch_one(self.pool())
            .await
            .map_err(|error| {
                FleetError::Database(format!("Failed to inspect station presence: {error}"))
            })
    }
}
