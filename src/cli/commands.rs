#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

/// Everything the binary can be asked to do, one variant per equipment
/// operation. Identifiers are raw i64 values here; the handlers wrap them in
/// typed ids.
#[derive(Debug, Clone)]
pub enum CliCommand {
    RegisterBicycle {
        brand: String,
        model: String,
        year: String,
        location: Option<String>,
    },
    UpdateBicycle {
        id: i64,
        brand: String,
        model: String,
        year: String,
        location: Option<String>,
    },
    DeleteBicycle {
        id: i64,
    },
    ListBicycles,
    ShowBicycle {
        id: i64,
    },
    BicycleStatus {
        id: i64,
        action: String,
    },
    EnterBicycle {
        bicycle_id: i64,
        dock_id: i64,
        repairer: String,
    },
    ExitBicycle {
        dock_id: i64,
        bicycle_id: Option<i64>,
        repairer: String,
        destination: String,
    },
    RegisterDock {
        model: String,
        year: String,
        location: Option<String>,
    },
    UpdateDock {
        id: i64,
        model: String,
        year: String,
        location: Option<String>,
    },
    DeleteDock {
        id: i64,
    },
    ListDocks,
    ShowDock {
        id: i64,
    },
    Lock {
        dock_id: i64,
        bicycle_id: Option<i64>,
    },
    Unlock {
        dock_id: i64,
        bicycle_id: Option<i64>,
    },
    DockStatus {
        id: i64,
        action: String,
    },
    DockBicycle {
        dock_id: i64,
    },
    EnterDock {
        station_id: i64,
        dock_id: i64,
        repairer: String,
    },
    ExitDock {
        dock_id: i64,
        station_id: Option<i64>,
        repairer: String,
        destination: String,
    },
    RegisterStation {
        location: String,
        description: String,
    },
    UpdateStation {
        id: i64,
        location: String,
        description: String,
    },
    DeleteStation {
        id: i64,
    },
    Stations,
    Docks {
        station_id: i64,
    },
    Bicycles {
        station_id: i64,
    },
    Help,
}
