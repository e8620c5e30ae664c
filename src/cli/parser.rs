#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::action::CliAction;
use super::commands::CliCommand;
use crate::output::OutputFormat;
use std::path::PathBuf;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CliError {
    #[error("Missing required argument: {}", arg)]
    MissingRequiredArg { arg: String },
    #[error("Unknown command: {}", cmd)]
    UnknownCommand { cmd: String },
    #[error("Invalid type for {}", arg)]
    InvalidArgType { arg: String },
    #[error("Invalid argument value for {}: {}", arg, error)]
    InvalidArgValue { arg: String, error: String },
}

/// Options valid in front of any command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub output: OutputFormat,
    pub config: Option<PathBuf>,
}

/// # Errors
/// Returns [`CliError`] when `--output` or `--config` carry bad values.
pub fn parse_global_options(args: &[String]) -> Result<GlobalOptions, CliError> {
    let output = parse_optional_arg::<OutputFormat>(args, "output")?.unwrap_or_default();
    let config = parse_optional_arg::<PathBuf>(args, "config")?;
    Ok(GlobalOptions { output, config })
}

/// # Errors
/// Returns [`CliError`] on unknown commands or malformed arguments.
pub fn parse_cli_args(args: &[String]) -> Result<CliAction, CliError> {
    if args
        .get(1)
        .is_some_and(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        return Ok(CliAction::ShowHelp);
    }

    match args.first().map(String::as_str) {
        None | Some("-h" | "--help") => Ok(CliAction::ShowHelp),
        Some("-v" | "--version") => Ok(CliAction::ShowVersion),
        Some("register-bicycle") => {
            let brand = parse_required_arg(args, "brand")?;
            let model = parse_required_arg(args, "model")?;
            let year = parse_required_arg(args, "year")?;
            let location = parse_optional_arg(args, "location")?;
            Ok(CliAction::Command(CliCommand::RegisterBicycle {
                brand,
                model,
                year,
                location,
            }))
        }
        Some("update-bicycle") => {
            let id = parse_required_arg(args, "id")?;
            let brand = parse_required_arg(args, "brand")?;
            let model = parse_required_arg(args, "model")?;
            let year = parse_required_arg(args, "year")?;
            let location = parse_optional_arg(args, "location")?;
            Ok(CliAction::Command(CliCommand::UpdateBicycle {
                id,
                brand,
                model,
                year,
                location,
            }))
        }
        Some("delete-bicycle") => Ok(CliAction::Command(CliCommand::DeleteBicycle {
            id: parse_required_arg(args, "id")?,
        })),
        Some("list-bicycles") => Ok(CliAction::Command(CliCommand::ListBicycles)),
        Some("show-bicycle") => Ok(CliAction::Command(CliCommand::ShowBicycle {
            id: parse_required_arg(args, "id")?,
        })),
        Some("bicycle-status") => {
            let id = parse_required_arg(args, "id")?;
            let action = parse_required_arg(args, "action")?;
            Ok(CliAction::Command(CliCommand::BicycleStatus { id, action }))
        }
        Some("enter-bicycle") => {
            let bicycle_id = parse_required_arg(args, "bicycle_id")?;
            let dock_id = parse_required_arg(args, "dock_id")?;
            let repairer = parse_required_arg(args, "repairer")?;
            Ok(CliAction::Command(CliCommand::EnterBicycle {
                bicycle_id,
                dock_id,
                repairer,
            }))
        }
        Some("exit-bicycle") => {
            let dock_id = parse_required_arg(args, "dock_id")?;
            let bicycle_id = parse_optional_arg(args, "bicycle_id")?;
            let repairer = parse_required_arg(args, "repairer")?;
            let destination = parse_required_arg(args, "destination")?;
            Ok(CliAction::Command(CliCommand::ExitBicycle {
                dock_id,
                bicycle_id,
                repairer,
                destination,
            }))
        }
        Some("register-dock") => {
            let model = parse_required_arg(args, "model")?;
            let year = parse_required_arg(args, "year")?;
            let location = parse_optional_arg(args, "location")?;
            Ok(CliAction::Command(CliCommand::RegisterDock {
                model,
                year,
                location,
            }))
        }
        Some("update-dock") => {
            let id = parse_required_arg(args, "id")?;
            let model = parse_required_arg(args, "model")?;
            let year = parse_required_arg(args, "year")?;
            let location = parse_optional_arg(args, "location")?;
            Ok(CliAction::Command(CliCommand::UpdateDock {
                id,
                model,
                year,
                location,
            }))
        }
        Some("delete-dock") => Ok(CliAction::Command(CliCommand::DeleteDock {
            id: parse_required_arg(args, "id")?,
        })),
        Some("list-docks") => Ok(CliAction::Command(CliCommand::ListDocks)),
        Some("show-dock") => Ok(CliAction::Command(CliCommand::ShowDock {
            id: parse_required_arg(args, "id")?,
        })),
        Some("lock") => {
            let dock_id = parse_required_arg(args, "dock_id")?;
            let bicycle_id = parse_optional_arg(args, "bicycle_id")?;
            Ok(CliAction::Command(CliCommand::Lock {
                dock_id,
                bicycle_id,
            }))
        }
        Some("unlock") => {
            let dock_id = parse_required_arg(args, "dock_id")?;
            let bicycle_id = parse_optional_arg(args, "bicycle_id")?;
            Ok(CliAction::Command(CliCommand::Unlock {
                dock_id,
                bicycle_id,
            }))
        }
        Some("dock-status") => {
            let id = parse_required_arg(args, "id")?;
            let action = parse_required_arg(args, "action")?;
            Ok(CliAction::Command(CliCommand::DockStatus { id, action }))
        }
        Some("dock-bicycle") => Ok(CliAction::Command(CliCommand::DockBicycle {
            dock_id: parse_required_arg(args, "dock_id")?,
        })),
        Some("enter-dock") => {
            let station_id = parse_required_arg(args, "station_id")?;
            let dock_id = parse_required_arg(args, "dock_id")?;
            let repairer = parse_required_arg(args, "repairer")?;
            Ok(CliAction::Command(CliCommand::EnterDock {
                station_id,
                dock_id,
                repairer,
            }))
        }
        Some("exit-dock") => {
            let dock_id = parse_required_arg(args, "dock_id")?;
            let station_id = parse_optional_arg(args, "station_id")?;
            let repairer = parse_required_arg(args, "repairer")?;
            let destination = parse_required_arg(args, "destination")?;
            Ok(CliAction::Command(CliCommand::ExitDock {
                dock_id,
                station_id,
                repairer,
                destination,
            }))
        }
        Some("register-station") => {
            let location = parse_required_arg(args, "location")?;
            let description = parse_required_arg(args, "description")?;
            Ok(CliAction::Command(CliCommand::RegisterStation {
                location,
                description,
            }))
        }
        Some("update-station") => {
            let id = parse_required_arg(args, "id")?;
            let location = parse_required_arg(args, "location")?;
            let description = parse_required_arg(args, "description")?;
            Ok(CliAction::Command(CliCommand::UpdateStation {
                id,
                location,
                description,
            }))
        }
        Some("delete-station") => Ok(CliAction::Command(CliCommand::DeleteStation {
            id: parse_required_arg(args, "id")?,
        })),
        Some("stations") => Ok(CliAction::Command(CliCommand::Stations)),
        Some("docks") => Ok(CliAction::Command(CliCommand::Docks {
            station_id: parse_required_arg(args, "station_id")?,
        })),
        Some("bicycles") => Ok(CliAction::Command(CliCommand::Bicycles {
            station_id: parse_required_arg(args, "station_id")?,
        })),
        Some("?" | "help") => Ok(CliAction::Command(CliCommand::Help)),
        Some(cmd) => Err(CliError::UnknownCommand {
            cmd: cmd.to_string(),
        }),
    }
}

fn parse_required_arg<T>(args: &[String], name: &str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let flag = format!("--{}", name.replace('_', "-"));
    let Some(position) = args.iter().position(|a| a.as_str() == flag) else {
        return Err(CliError::MissingRequiredArg {
            arg: name.to_string(),
        });
    };

    let Some(raw_value) = args.get(position + 1) else {
        return Err(CliError::MissingRequiredArg {
            arg: name.to_string(),
        });
    };

    if raw_value.starts_with("--") {
        return Err(CliError::MissingRequiredArg {
            arg: name.to_string(),
        });
    }

    raw_value
        .parse::<T>()
        .map_err(|_| CliError::InvalidArgType {
            arg: name.to_string(),
        })
}

fn parse_optional_arg<T>(args: &[String], name: &str) -> Result<Option<T>, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let flag = format!("--{}", name.replace('_', "-"));
    match args.iter().position(|a| a.as_str() == flag) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| {
                if v.starts_with("--") {
                    return Err(CliError::MissingRequiredArg {
                        arg: name.to_string(),
                    });
                }
                v.parse::<T>().map_err(|e| CliError::InvalidArgValue {
                    arg: name.to_string(),
                    error: format!("{e}"),
                })
            })
            .transpose(),
    }
}
