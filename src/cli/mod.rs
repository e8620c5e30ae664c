#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod action;
mod commands;
mod parser;

pub use action::CliAction;
pub use commands::CliCommand;
pub use parser::{parse_cli_args, parse_global_options, CliError, GlobalOptions};
