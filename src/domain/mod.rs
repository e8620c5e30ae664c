#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod bicycle;
pub mod dock;
pub mod ids;
pub mod repair;
pub mod station;

pub use bicycle::{Bicycle, BicycleStatus, BicycleUpdate, NewBicycle};
pub use dock::{Dock, DockAction, DockStatus, DockUpdate, NewDock};
pub use ids::{BicycleId, DockId, StationId, TechnicianId};
pub use repair::RepairDestination;
pub use station::{BicycleAtStation, Station, StationSummary};
