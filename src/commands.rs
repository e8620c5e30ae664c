#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::cli::{CliCommand, GlobalOptions};
use crate::config::{load_config, Config};
use crate::db::EquipmentDb;
use crate::domain::{
    BicycleId, BicycleUpdate, DockId, DockUpdate, NewBicycle, NewDock, StationId, TechnicianId,
};
use crate::error::Result;
use crate::integrations::{HttpDirectoryClient, HttpNotifier};
use crate::output::emit_output;
use crate::services::{
    BicycleService, DockService, EnterBicycleCommand, EnterDockCommand, ExitBicycleCommand,
    ExitDockCommand, QueryService, StationService,
};
use serde_json::json;

const HTTP_TIMEOUT_SECS: u64 = 30;

/// Wire config, store and integrations together and run one command.
///
/// # Errors
/// Propagates every [`crate::error::FleetError`] the underlying operation
/// produces; the caller maps it to an exit code.
pub async fn run_command(options: GlobalOptions, command: CliCommand) -> Result<()> {
    if matches!(command, CliCommand::Help) {
        print_help();
        return Ok(());
    }

    let config = load_config(options.config.clone()).await?;
    let db = EquipmentDb::new(&config.database_url).await?;
    dispatch(&options, &config, db, command).await
}

#[allow(clippy::too_many_lines)]
async fn dispatch(
    options: &GlobalOptions,
    config: &Config,
    db: EquipmentDb,
    command: CliCommand,
) -> Result<()> {
    match command {
        CliCommand::RegisterBicycle {
            brand,
            model,
            year,
            location,
        } => {
            let bicycle = bicycle_service(config, db)?
                .register(NewBicycle {
                    brand,
                    model,
                    year,
                    location,
                })
                .await?;
            emit_output(
                options.output,
                "register-bicycle",
                &json!({
                    "message": format!("registered bicycle {}", bicycle.number().unwrap_or("?")),
                    "bicycle": serde_json::to_value(&bicycle)?,
                }),
            );
            Ok(())
        }
        CliCommand::UpdateBicycle {
            id,
            brand,
            model,
            year,
            location,
        } => {
            let bicycle = bicycle_service(config, db)?
                .update(
                    BicycleId::new(id),
                    BicycleUpdate {
                        brand,
                        model,
                        year,
                        location,
                        number: None,
                        status: None,
                    },
                )
                .await?;
            emit_output(
                options.output,
                "update-bicycle",
                &json!({
                    "message": format!("updated bicycle {id}"),
                    "bicycle": serde_json::to_value(&bicycle)?,
                }),
            );
            Ok(())
        }
        CliCommand::DeleteBicycle { id } => {
            bicycle_service(config, db)?
                .delete(BicycleId::new(id))
                .await?;
            emit_output(
                options.output,
                "delete-bicycle",
                &json!({"message": format!("excluded bicycle {id}")}),
            );
            Ok(())
        }
        CliCommand::ListBicycles => {
            let bicycles = bicycle_service(config, db)?.list().await?;
            emit_output(
                options.output,
                "list-bicycles",
                &json!({
                    "message": format!("{} bicycle(s)", bicycles.len()),
                    "bicycles": serde_json::to_value(&bicycles)?,
                }),
            );
            Ok(())
        }
        CliCommand::ShowBicycle { id } => {
            let bicycle = bicycle_service(config, db)?.get(BicycleId::new(id)).await?;
            emit_output(
                options.output,
                "show-bicycle",
                &json!({"bicycle": serde_json::to_value(&bicycle)?}),
            );
            Ok(())
        }
        CliCommand::BicycleStatus { id, action } => {
            let bicycle = bicycle_service(config, db)?
                .change_status(BicycleId::new(id), &action)
                .await?;
            emit_output(
                options.output,
                "bicycle-status",
                &json!({
                    "message": format!("bicycle {id} is now {}", bicycle.status().as_str()),
                    "status": bicycle.status().as_str(),
                }),
            );
            Ok(())
        }
        CliCommand::EnterBicycle {
            bicycle_id,
            dock_id,
            repairer,
        } => {
            bicycle_service(config, db)?
                .enter_network(EnterBicycleCommand {
                    bicycle_id: BicycleId::new(bicycle_id),
                    dock_id: DockId::new(dock_id),
                    repairer: TechnicianId::new(repairer),
                })
                .await?;
            emit_output(
                options.output,
                "enter-bicycle",
                &json!({"message": format!("bicycle {bicycle_id} entered the network at dock {dock_id}")}),
            );
            Ok(())
        }
        CliCommand::ExitBicycle {
            dock_id,
            bicycle_id,
            repairer,
            destination,
        } => {
            bicycle_service(config, db)?
                .exit_network(ExitBicycleCommand {
                    dock_id: DockId::new(dock_id),
                    bicycle_id: bicycle_id.map(BicycleId::new),
                    repairer: TechnicianId::new(repairer),
                    destination,
                })
                .await?;
            emit_output(
                options.output,
                "exit-bicycle",
                &json!({"message": format!("bicycle left the network from dock {dock_id}")}),
            );
            Ok(())
        }
        CliCommand::RegisterDock {
            model,
            year,
            location,
        } => {
            let dock = dock_service(config, db)?
                .register(NewDock {
                    model,
                    year,
                    location,
                })
                .await?;
            emit_output(
                options.output,
                "register-dock",
                &json!({
                    "message": format!("registered dock {}", dock.number().unwrap_or("?")),
                    "dock": serde_json::to_value(&dock)?,
                }),
            );
            Ok(())
        }
        CliCommand::UpdateDock {
            id,
            model,
            year,
            location,
        } => {
            let dock = dock_service(config, db)?
                .update(
                    DockId::new(id),
                    DockUpdate {
                        model,
                        year,
                        location,
                        number: None,
                        status: None,
                    },
                )
                .await?;
            emit_output(
                options.output,
                "update-dock",
                &json!({
                    "message": format!("updated dock {id}"),
                    "dock": serde_json::to_value(&dock)?,
                }),
            );
            Ok(())
        }
        CliCommand::DeleteDock { id } => {
            dock_service(config, db)?.delete(DockId::new(id)).await?;
            emit_output(
                options.output,
                "delete-dock",
                &json!({"message": format!("excluded dock {id}")}),
            );
            Ok(())
        }
        CliCommand::ListDocks => {
            let docks = dock_service(config, db)?.list().await?;
            emit_output(
                options.output,
                "list-docks",
                &json!({
                    "message": format!("{} dock(s)", docks.len()),
                    "docks": serde_json::to_value(&docks)?,
                }),
            );
            Ok(())
        }
        CliCommand::ShowDock { id } => {
            let dock = dock_service(config, db)?.get(DockId::new(id)).await?;
            emit_output(
                options.output,
                "show-dock",
                &json!({"dock": serde_json::to_value(&dock)?}),
            );
            Ok(())
        }
        CliCommand::Lock {
            dock_id,
            bicycle_id,
        } => {
            let dock = dock_service(config, db)?
                .lock(DockId::new(dock_id), bicycle_id.map(BicycleId::new))
                .await?;
            emit_output(
                options.output,
                "lock",
                &json!({
                    "message": format!("dock {dock_id} locked"),
                    "status": dock.status().as_str(),
                }),
            );
            Ok(())
        }
        CliCommand::Unlock {
            dock_id,
            bicycle_id,
        } => {
            let dock = dock_service(config, db)?
                .unlock(DockId::new(dock_id), bicycle_id.map(BicycleId::new))
                .await?;
            emit_output(
                options.output,
                "unlock",
                &json!({
                    "message": format!("dock {dock_id} unlocked"),
                    "status": dock.status().as_str(),
                }),
            );
            Ok(())
        }
        CliCommand::DockStatus { id, action } => {
            let dock = dock_service(config, db)?
                .change_status(DockId::new(id), &action)
                .await?;
            emit_output(
                options.output,
                "dock-status",
                &json!({
                    "message": format!("dock {id} is now {}", dock.status().as_str()),
                    "status": dock.status().as_str(),
                }),
            );
            Ok(())
        }
        CliCommand::DockBicycle { dock_id } => {
            let bicycle = dock_service(config, db)?
                .bicycle_at_dock(DockId::new(dock_id))
                .await?;
            emit_output(
                options.output,
                "dock-bicycle",
                &json!({"bicycle": serde_json::to_value(&bicycle)?}),
            );
            Ok(())
        }
        CliCommand::EnterDock {
            station_id,
            dock_id,
            repairer,
        } => {
            dock_service(config, db)?
                .enter_network(EnterDockCommand {
                    station_id: StationId::new(station_id),
                    dock_id: DockId::new(dock_id),
                    repairer: TechnicianId::new(repairer),
                })
                .await?;
            emit_output(
                options.output,
                "enter-dock",
                &json!({"message": format!("dock {dock_id} installed at station {station_id}")}),
            );
            Ok(())
        }
        CliCommand::ExitDock {
            dock_id,
            station_id,
            repairer,
            destination,
        } => {
            dock_service(config, db)?
                .exit_network(ExitDockCommand {
                    dock_id: DockId::new(dock_id),
                    station_id: station_id.map(StationId::new),
                    repairer: TechnicianId::new(repairer),
                    destination,
                })
                .await?;
            emit_output(
                options.output,
                "exit-dock",
                &json!({"message": format!("dock {dock_id} left the network")}),
            );
            Ok(())
        }
        CliCommand::RegisterStation {
            location,
            description,
        } => {
            let station = StationService::new(db).register(location, description).await?;
            emit_output(
                options.output,
                "register-station",
                &json!({
                    "message": format!(
                        "registered station {}",
                        station.id().map_or(0, StationId::value)
                    ),
                    "station": serde_json::to_value(&station)?,
                }),
            );
            Ok(())
        }
        CliCommand::UpdateStation {
            id,
            location,
            description,
        } => {
            let station = StationService::new(db)
                .update(StationId::new(id), location, description)
                .await?;
            emit_output(
                options.output,
                "update-station",
                &json!({
                    "message": format!("updated station {id}"),
                    "station": serde_json::to_value(&station)?,
                }),
            );
            Ok(())
        }
        CliCommand::DeleteStation { id } => {
            StationService::new(db).delete(StationId::new(id)).await?;
            emit_output(
                options.output,
                "delete-station",
                &json!({"message": format!("deleted station {id}")}),
            );
            Ok(())
        }
        CliCommand::Stations => {
            let stations = StationService::new(db).list().await?;
            emit_output(
                options.output,
                "stations",
                &json!({
                    "message": format!("{} station(s)", stations.len()),
                    "stations": serde_json::to_value(&stations)?,
                }),
            );
            Ok(())
        }
        CliCommand::Docks { station_id } => {
            let docks = QueryService::new(db)
                .docks_at_station(StationId::new(station_id))
                .await?;
            emit_output(
                options.output,
                "docks",
                &json!({
                    "message": format!("{} dock(s) at station {station_id}", docks.len()),
                    "docks": serde_json::to_value(&docks)?,
                }),
            );
            Ok(())
        }
        CliCommand::Bicycles { station_id } => {
            let bicycles = QueryService::new(db)
                .bicycles_at_station(StationId::new(station_id))
                .await?;
            emit_output(
                options.output,
                "bicycles",
                &json!({
                    "message": format!("{} bicycle(s) at station {station_id}", bicycles.len()),
                    "bicycles": serde_json::to_value(&bicycles)?,
                }),
            );
            Ok(())
        }
        CliCommand::Help => {
            print_help();
            Ok(())
        }
    }
}

fn bicycle_service(
    config: &Config,
    db: EquipmentDb,
) -> Result<BicycleService<EquipmentDb, HttpDirectoryClient, HttpNotifier>> {
    Ok(BicycleService::new(
        db,
        HttpDirectoryClient::new(&config.directory_base_url, HTTP_TIMEOUT_SECS)?,
        HttpNotifier::new(&config.notifier_base_url, HTTP_TIMEOUT_SECS)?,
    ))
}

fn dock_service(
    config: &Config,
    db: EquipmentDb,
) -> Result<DockService<EquipmentDb, HttpDirectoryClient, HttpNotifier>> {
    Ok(DockService::new(
        db,
        HttpDirectoryClient::new(&config.directory_base_url, HTTP_TIMEOUT_SECS)?,
        HttpNotifier::new(&config.notifier_base_url, HTTP_TIMEOUT_SECS)?,
    ))
}

pub fn print_help() {
    println!("dockfleet - shared bicycle docking equipment tracker");
    println!();
    println!("Usage: dockfleet <command> [--output text|json] [--config PATH]");
    println!();
    println!("Bicycles:");
    println!("  register-bicycle --brand B --model M --year Y [--location L]");
    println!("  update-bicycle --id N --brand B --model M --year Y [--location L]");
    println!("  delete-bicycle --id N");
    println!("  list-bicycles");
    println!("  show-bicycle --id N");
    println!("  bicycle-status --id N --action STATUS");
    println!("  enter-bicycle --bicycle-id N --dock-id N --repairer REG");
    println!("  exit-bicycle --dock-id N [--bicycle-id N] --repairer REG --destination D");
    println!();
    println!("Docks:");
    println!("  register-dock --model M --year Y [--location L]");
    println!("  update-dock --id N --model M --year Y [--location L]");
    println!("  delete-dock --id N");
    println!("  list-docks");
    println!("  show-dock --id N");
    println!("  lock --dock-id N [--bicycle-id N]");
    println!("  unlock --dock-id N [--bicycle-id N]");
    println!("  dock-status --id N --action LOCK|UNLOCK|REPAIR_REQUESTED|RETIRED");
    println!("  dock-bicycle --dock-id N");
    println!("  enter-dock --station-id N --dock-id N --repairer REG");
    println!("  exit-dock --dock-id N [--station-id N] --repairer REG --destination D");
    println!();
    println!("Stations:");
    println!("  register-station --location L --description D");
    println!("  update-station --id N --location L --description D");
    println!("  delete-station --id N");
    println!("  stations");
    println!("  docks --station-id N");
    println!("  bicycles --station-id N");
    println!();
    println!("Destinations: IN_REPAIR or RETIRED");
    println!();
    println!("Error codes:");
    for (error_code, description, fix) in crate::error::ERROR_CODES {
        println!("  {error_code:<10} {description} ({fix})");
    }
}
