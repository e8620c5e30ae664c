#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::mappers::{parse_bicycle, BicycleRow};
use super::EquipmentDb;
use crate::domain::{Bicycle, BicycleId};
use crate::error::{FleetError, Result};

const BICYCLE_COLUMNS: &str = "id, numero, status, marca, modelo, ano, localizacao, reparador";

/// Row update usable both on the pool and inside a transaction.
pub(crate) async fn update_bicycle_on<'e, E>(executor: E, bicycle: &Bicycle) -> Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    let id = bicycle
        .id()
        .ok_or_else(|| FleetError::Internal("bicycle has no id to update".to_string()))?;
    let result = sqlx::query(
        "UPDATE bicicleta
         SET numero = $2, status = $3, marca = $4, modelo = $5, ano = $6,
             localizacao = $7, reparador = $8
         WHERE id = $1",
    )
    .bind(id.value())
    .bind(bicycle.number())
    .bind(bicycle.status().as_str())
    .bind(bicycle.brand())
    .bind(bicycle.model())
    .bind(bicycle.year())
    .bind(bicycle.location())
    .bind(bicycle.repairer().map(|r| r.value().to_string()))
    .execute(executor)
    .await
    .map_err(|error| FleetError::Database(format!("Failed to update bicycle: {error}")))?;

    if result.rows_affected() == 0 {
        return Err(FleetError::NotFound("bicycle not found".to_string()));
    }
    Ok(())
}

impl EquipmentDb {
    /// # Errors
    /// Returns [`FleetError::Database`] when the query or mapping fails.
    pub async fn fetch_bicycle(&self, id: BicycleId) -> Result<Option<Bicycle>> {
        sqlx::query_as::<_, BicycleRow>(&format!(
            "SELECT {BICYCLE_COLUMNS} FROM bicicleta WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to load bicycle: {error}")))?
        .map(parse_bicycle)
        .transpose()
    }

    /// Inserts the row and hands back the entity with its assigned id.
    ///
    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails.
    pub async fn create_bicycle(&self, mut bicycle: Bicycle) -> Result<Bicycle> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO bicicleta (numero, status, marca, modelo, ano, localizacao, reparador)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(bicycle.number())
        .bind(bicycle.status().as_str())
        .bind(bicycle.brand())
        .bind(bicycle.model())
        .bind(bicycle.year())
        .bind(bicycle.location())
        .bind(bicycle.repairer().map(|r| r.value().to_string()))
        .fetch_one(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to insert bicycle: {error}")))?;

        bicycle.set_id(BicycleId::new(id));
        Ok(bicycle)
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when persistence fails and
    /// [`FleetError::NotFound`] when the row no longer exists.
    pub async fn update_bicycle(&self, bicycle: &Bicycle) -> Result<()> {
        update_bicycle_on(self.pool(), bicycle).await
    }

    /// # Errors
    /// Returns [`FleetError::Database`] when the query or mapping fails.
    pub async fn fetch_bicycles(&self) -> Result<Vec<Bicycle>> {
        sqlx::query_as::<_, BicycleRow>(&format!(
            "SELECT {BICYCLE_COLUMNS} FROM bicicleta ORDER BY id ASC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(|error| FleetError::Database(format!("Failed to load bicycles: {error}")))?
        .into_iter()
        .map(parse_bicycle)
        .collect()
    }

    /// Which dock, if any, holds this bicycle.
    ///
    /// # Errors
    /// Returns [`FleetError::Database`] when the query fails.
    pub async fn find_dock_holding_bicycle(&self, bicycle: BicycleId) -> Result<Option<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM tranca WHERE bicicleta_id = $1")
            .bind(bicycle.value())
            .fetch_optional(self.pool())
            .await
            .map_err(|error| {
                FleetError::Database(format!("Failed to look up bicycle binding: {error}"))
            })
    }
}
