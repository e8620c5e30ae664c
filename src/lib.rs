#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod integrations;
pub mod output;
pub mod services;

pub use db::EquipmentDb;
pub use error::{FleetError, Result};
pub use domain::{
    Bicycle, BicycleId, BicycleStatus, Dock, DockId, DockStatus, Station, StationId, TechnicianId,
};
