#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use dockfleet::cli::{parse_cli_args, parse_global_options, CliAction};
use dockfleet::commands::{print_help, run_command};
use dockfleet::error::code;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_global_options(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("{}: {error}", code::CLI_ERROR);
            std::process::exit(1);
        }
    };

    let action = match parse_cli_args(&args) {
        Ok(action) => action,
        Err(error) => {
            eprintln!("{}: {error}", code::CLI_ERROR);
            eprintln!("Run 'dockfleet --help' for usage.");
            std::process::exit(1);
        }
    };

    match action {
        CliAction::ShowHelp => print_help(),
        CliAction::ShowVersion => println!("dockfleet {}", env!("CARGO_PKG_VERSION")),
        CliAction::Command(command) => {
            if let Err(error) = run_command(options, command).await {
                eprintln!("{}: {error}", error.code());
                std::process::exit(error.exit_code());
            }
        }
    }
}
