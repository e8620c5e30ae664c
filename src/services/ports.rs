#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{Bicycle, BicycleId, Dock, DockId, Station, StationId, TechnicianId};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Identity confirmed by the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub registration: String,
    pub name: String,
    pub email: String,
}

/// Outbound message handed to the notification dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Durable keyed storage for the three equipment types. Implementations must
/// commit the two-entity save methods atomically; the managers never hold a
/// transaction handle themselves.
pub trait EquipmentStore {
    fn get_bicycle(&self, id: BicycleId) -> PortFuture<'_, Option<Bicycle>>;

    /// Persists a new bicycle and returns it with the store-assigned id.
    fn insert_bicycle(&self, bicycle: Bicycle) -> PortFuture<'_, Bicycle>;

    fn save_bicycle<'a>(&'a self, bicycle: &'a Bicycle) -> PortFuture<'a, ()>;

    fn get_dock(&self, id: DockId) -> PortFuture<'_, Option<Dock>>;

    /// Persists a new dock and returns it with the store-assigned id.
    fn insert_dock(&self, dock: Dock) -> PortFuture<'_, Dock>;

    fn save_dock<'a>(&'a self, dock: &'a Dock) -> PortFuture<'a, ()>;

    fn get_station(&self, id: StationId) -> PortFuture<'_, Option<Station>>;

    /// Persists a new station and returns it with the store-assigned id.
    fn insert_station(&self, station: Station) -> PortFuture<'_, Station>;

    fn save_station<'a>(&'a self, station: &'a Station) -> PortFuture<'a, ()>;

    /// Hard delete; only stations are ever removed outright.
    fn delete_station(&self, id: StationId) -> PortFuture<'_, ()>;

    fn list_bicycles(&self) -> PortFuture<'_, Vec<Bicycle>>;

    fn list_docks(&self) -> PortFuture<'_, Vec<Dock>>;

    fn list_stations(&self) -> PortFuture<'_, Vec<Station>>;

    fn list_docks_at_station(&self, station: StationId) -> PortFuture<'_, Vec<Dock>>;

    fn station_exists(&self, id: StationId) -> PortFuture<'_, bool>;

    /// Which dock, if any, currently holds this bicycle. Backs the
    /// at-most-one-dock-per-bicycle invariant.
    fn dock_holding_bicycle(&self, bicycle: BicycleId) -> PortFuture<'_, Option<DockId>>;

    /// Saves both entities inside one commit boundary.
    fn save_bicycle_and_dock<'a>(
        &'a self,
        bicycle: &'a Bicycle,
        dock: &'a Dock,
    ) -> PortFuture<'a, ()>;

    /// Saves both entities inside one commit boundary.
    fn save_dock_and_station<'a>(
        &'a self,
        dock: &'a Dock,
        station: &'a Station,
    ) -> PortFuture<'a, ()>;
}

/// Employee/technician directory lookup. Any error is treated by callers as
/// "technician does not exist".
pub trait DirectoryClient {
    fn resolve_employee<'a>(&'a self, registration: &'a TechnicianId) -> PortFuture<'a, Employee>;
}

/// Notification dispatch.
pub trait Notifier {
    fn send(&self, notification: Notification) -> PortFuture<'_, ()>;
}
