#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod directory;
pub mod notifier;

pub use directory::HttpDirectoryClient;
pub use notifier::HttpNotifier;
