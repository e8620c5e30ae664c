#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::ports::EquipmentStore;
use crate::domain::{BicycleAtStation, Dock, StationId};
use crate::error::{FleetError, Result};

/// Read-only cross-entity views over one store.
pub struct QueryService<S> {
    store: S,
}

impl<S> QueryService<S>
where
    S: EquipmentStore + Sync,
{
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// All docks installed at a station.
    ///
    /// # Errors
    /// Returns `FleetError::NotFound` when the station does not exist.
    pub async fn docks_at_station(&self, station: StationId) -> Result<Vec<Dock>> {
        if !self.store.station_exists(station).await? {
            return Err(FleetError::NotFound("station not found".to_string()));
        }
        self.store.list_docks_at_station(station).await
    }

    /// The bicycles currently docked at a station, as a reduced view. Docks
    /// holding no bicycle are filtered out.
    ///
    /// # Errors
    /// Returns `FleetError::NotFound` when the station does not exist.
    pub async fn bicycles_at_station(&self, station: StationId) -> Result<Vec<BicycleAtStation>> {
        let docks = self.docks_at_station(station).await?;
        let mut bicycles = Vec::new();
        for dock in docks {
            let Some(bound) = dock.bicycle() else {
                continue;
            };
            let bicycle = self.store.get_bicycle(bound).await?.ok_or_else(|| {
                FleetError::Internal(format!("dock references missing bicycle {bound}"))
            })?;
            let Some(id) = bicycle.id() else {
                continue;
            };
            bicycles.push(BicycleAtStation {
                id,
                number: bicycle.number().map(str::to_string),
                status: bicycle.status(),
            });
        }
        Ok(bicycles)
    }
}
