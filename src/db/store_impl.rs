#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::bicycle_ops::update_bicycle_on;
use super::dock_ops::update_dock_on;
use super::station_ops::update_station_on;
use super::EquipmentDb;
use crate::domain::{Bicycle, BicycleId, Dock, DockId, Station, StationId};
use crate::error::{FleetError, Result};
use crate::services::ports::{EquipmentStore, PortFuture};

impl EquipmentDb {
    /// Both row updates inside one transaction.
    ///
    /// # Errors
    /// Returns [`FleetError::Database`] when any statement or the commit fails;
    /// nothing is persisted in that case.
    pub async fn update_bicycle_and_dock(&self, bicycle: &Bicycle, dock: &Dock) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(|error| {
            FleetError::Database(format!("Failed to open transaction: {error}"))
        })?;
        update_bicycle_on(&mut *tx, bicycle).await?;
        update_dock_on(&mut *tx, dock).await?;
        tx.commit()
            .await
            .map_err(|error| FleetError::Database(format!("Failed to commit: {error}")))
    }

    /// Both row updates inside one transaction.
    ///
    /// # Errors
    /// Returns [`FleetError::Database`] when any statement or the commit fails;
    /// nothing is persisted in that case.
    pub async fn update_dock_and_station(&self, dock: &Dock, station: &Station) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(|error| {
            FleetError::Database(format!("Failed to open transaction: {error}"))
        })?;
        update_dock_on(&mut *tx, dock).await?;
        update_station_on(&mut *tx, station).await?;
        tx.commit()
            .await
            .map_err(|error| FleetError::Database(format!("Failed to commit: {error}")))
    }
}

impl EquipmentStore for EquipmentDb {
    fn get_bicycle(&self, id: BicycleId) -> PortFuture<'_, Option<Bicycle>> {
        Box::pin(self.fetch_bicycle(id))
    }

    fn insert_bicycle(&self, bicycle: Bicycle) -> PortFuture<'_, Bicycle> {
        Box::pin(self.create_bicycle(bicycle))
    }

    fn save_bicycle<'a>(&'a self, bicycle: &'a Bicycle) -> PortFuture<'a, ()> {
        Box::pin(self.update_bicycle(bicycle))
    }

    fn get_dock(&self, id: DockId) -> PortFuture<'_, Option<Dock>> {
        Box::pin(self.fetch_dock(id))
    }

    fn insert_dock(&self, dock: Dock) -> PortFuture<'_, Dock> {
        Box::pin(self.create_dock(dock))
    }

    fn save_dock<'a>(&'a self, dock: &'a Dock) -> PortFuture<'a, ()> {
        Box::pin(self.update_dock(dock))
    }

    fn get_station(&self, id: StationId) -> PortFuture<'_, Option<Station>> {
        Box::pin(self.fetch_station(id))
    }

    fn insert_station(&self, station: Station) -> PortFuture<'_, Station> {
        Box::pin(self.create_station(station))
    }

    fn save_station<'a>(&'a self, station: &'a Station) -> PortFuture<'a, ()> {
        Box::pin(self.update_station(station))
    }

    fn delete_station(&self, id: StationId) -> PortFuture<'_, ()> {
        Box::pin(self.remove_station(id))
    }

    fn list_bicycles(&self) -> PortFuture<'_, Vec<Bicycle>> {
        Box::pin(self.fetch_bicycles())
    }

    fn list_docks(&self) -> PortFuture<'_, Vec<Dock>> {
        Box::pin(self.fetch_docks())
    }

    fn list_stations(&self) -> PortFuture<'_, Vec<Station>> {
        Box::pin(self.fetch_stations())
    }

    fn list_docks_at_station(&self, station: StationId) -> PortFuture<'_, Vec<Dock>> {
        Box::pin(self.fetch_docks_at_station(station))
    }

    fn station_exists(&self, id: StationId) -> PortFuture<'_, bool> {
        Box::pin(self.has_station(id))
    }

    fn dock_holding_bicycle(&self, bicycle: BicycleId) -> PortFuture<'_, Option<DockId>> {
        Box::pin(async move {
            self.find_dock_holding_bicycle(bicycle)
                .await
                .map(|id| id.map(DockId::new))
        })
    }

    fn save_bicycle_and_dock<'a>(
        &'a self,
        bicycle: &'a Bicycle,
        dock: &'a Dock,
    ) -> PortFuture<'a, ()> {
        Box::pin(self.update_bicycle_and_dock(bicycle, dock))
    }

    fn save_dock_and_station<'a>(
        &'a self,
        dock: &'a Dock,
        station: &'a Station,
    ) -> PortFuture<'a, ()> {
        Box::pin(self.update_dock_and_station(dock, station))
    }
}
