#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod bicycle;
pub mod dock;
pub mod ports;
pub mod query;
pub mod station;

pub use bicycle::{BicycleService, EnterBicycleCommand, ExitBicycleCommand};
pub use dock::{DockService, EnterDockCommand, ExitDockCommand};
pub use ports::{DirectoryClient, Employee, EquipmentStore, Notification, Notifier, PortFuture};
pub use query::QueryService;
pub use station::StationService;
