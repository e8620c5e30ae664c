#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::ports::EquipmentStore;
use crate::domain::{Station, StationId, StationSummary};
use crate::error::{FleetError, Result};
use tracing::info;

/// Station Lifecycle Manager. Stations are plain records with no status
/// machine; deletion is a hard delete, gated on the station being empty.
pub struct StationService<S> {
    store: S,
}

impl<S> StationService<S>
where
    S: EquipmentStore + Sync,
{
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// # Errors
    /// Returns `FleetError::Validation` on blank location or description.
    pub async fn register(
        &self,
        location: impl Into<String> + Send,
        description: impl Into<String> + Send,
    ) -> Result<Station> {
        let station = Station::new(location, description)?;
        let station = self.store.insert_station(station).await?;
        info!(
            station = station.id().map(StationId::value),
            "registered station"
        );
        Ok(station)
    }

    /// # Errors
    /// Returns `FleetError::NotFound` when the station does not exist.
    pub async fn get(&self, id: StationId) -> Result<Station> {
        self.store
            .get_station(id)
            .await?
            .ok_or_else(|| FleetError::NotFound("station not found".to_string()))
    }

    /// # Errors
    /// Returns `FleetError::NotFound` when absent and `FleetError::Validation`
    /// on blank fields.
    pub async fn update(
        &self,
        id: StationId,
        location: impl Into<String> + Send,
        description: impl Into<String> + Send,
    ) -> Result<Station> {
        let mut station = self.get(id).await?;
        station.apply_update(location, description)?;
        self.store.save_station(&station).await?;
        Ok(station)
    }

    /// Hard delete. A station hosting docks cannot be removed.
    ///
    /// # Errors
    /// Returns `FleetError::NotFound` when absent and
    /// `FleetError::Precondition` when docks are still installed.
    pub async fn delete(&self, id: StationId) -> Result<()> {
        let _ = self.get(id).await?;
        if !self.store.list_docks_at_station(id).await?.is_empty() {
            return Err(FleetError::Precondition(
                "a station hosting docks cannot be deleted".to_string(),
            ));
        }
        self.store.delete_station(id).await?;
        info!(station = id.value(), "station deleted");
        Ok(())
    }

    /// All stations with their dock counts.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn list(&self) -> Result<Vec<StationSummary>> {
        let stations = self.store.list_stations().await?;
        let mut summaries = Vec::with_capacity(stations.len());
        for station in stations {
            let Some(id) = station.id() else {
                continue;
            };
            let dock_count = self.store.list_docks_at_station(id).await?.len();
            summaries.push(StationSummary {
                id,
                location: station.location().to_string(),
                description: station.description().to_string(),
                dock_count,
            });
        }
        Ok(summaries)
    }
}
