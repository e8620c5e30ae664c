#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::mappers::{parse_dock, DockRow};
use super::EquipmentDb;
use crate::domain::{BicycleId, Dock, DockId, StationId};
use crate::error::{FleetError, Result};

const DOCK_COLUMNS: &str =
    "id, numero, status, modelo, ano, localizacao, reparador, bicicleta_id, totem_id";

/// Row update usable both on the pool and inside a transaction.
pub(crate) async fn update_dock_on<'e, E>(executor: E, dock: &Dock) -> Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    let id = dock
        .id()
        .ok_or_else(|| FleetError::Internal("dock has no id to update".to_string()))?;
    let result = sqlx::query(
        "UPDATE tranca
         SET numero = $2, status = $3, modelo = $4, ano = $5, localizacao = $6,
             reparador = $7, bicicleta_id = $8, totem_id = $9
         WHERE id = $1",
    )
    .bind(id.value())
    .bind(dock.number())
    .bind(dock.status().as_str())
    .bind(dock.model())
    .bind(dock.year())
    .bind(dock.location())
    .bind(dock.repairer().map(|r| r.value().to_string()))
    .bind(dock.bicycle().map(BicycleId::value))
    .bind(dock.station().map(StationId::value))
    .execute(executor)
    .await
    .map_err(|error| FleetError::Database(format!("Failed to update dock: {error}")))?;

    if result.rows_affected() == 0 {
        return Err(FleetError::NotFound("dock not found".to_string()));
    }
    Ok(())
}

impl EquipmentDb {
    /// # Errors
    /// Returns [`FleetError::Database`] when the query or mapping fails.
    pub async fn fetch_dock(&self, id: DockId) -> Result<Option<Dock>> {
        sqlx::query_as::<_, DockRow>(&format!("SELECT {DOCK_COLUMNS} FROM tranca WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(self.pool())
            .await
            .map_err(|error| FleetError::Database(format!("Failed to load dock: {error}")))?
            .map(parse_dock)
            .transpose()
    }

    /// Inserts the row and hands back the entity with its assigned id.
    ///
    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails.
    pub async fn create_dock(&self, mut dock: Dock) -> Result<Dock> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO tranca (numero, status, modelo, ano, localizacao, reparador, bicicleta_id, totem_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(dock.number())
        .bind(dock.status().as_str())
        .bind(dock.model())
        .bind(dock.year())
        .bind(dock.location())
        .bind(dock.repairer().map(|r| r.value().to_string()))
        .bind(dock.bicycle().map(BicycleId::value))
        .bind(dock.station().map(StationId::value))
        .fetch_one(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to insert dock: {error}")))?;

        dock.set_id(DockId::new(id));
        Ok(dock)
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails and
    /// [`FleetError::NotFound`] when the row no longer exists.
    pub async fn update_dock(&self, dock: &Dock) -> Result<()> {
        update_dock_on(self.pool(), dock).await
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when the query or mapping fails.
    pub async fn fetch_docks(&self) -> Result<Vec<Dock>> {
        sqlx::query_as::<_, DockRow>(&format!("SELECT {DOCK_COLUMNS} FROM tranca ORDER BY id ASC"))
            .fetch_all(self.pool())
            .await
            .map_err(|error| FleetError::Database(format!("Failed to load docks: {error}")))?
            .into_iter()
            .map(parse_dock)
            .collect()
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when the query or mapping fails.
    pub async fn fetch_docks_at_station(&self, station: StationId) -> Result<Vec<Dock>> {
        sqlx::query_as::<_, DockRow>(&format!(
            "SELECT {DOCK_COLUMNS} FROM tranca WHERE totem_id = $1 ORDER BY id ASC"
        ))
        .bind(station.value())
        .fetch_all(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to load station docks: {error}")))?
        .into_iter()
        .map(parse_dock)
        .collect()
    }
}
