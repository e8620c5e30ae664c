#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::ports::{DirectoryClient, Employee, EquipmentStore, Notification, Notifier};
use crate::domain::{
    Bicycle, BicycleId, Dock, DockAction, DockId, DockStatus, DockUpdate, NewDock,
    RepairDestination, StationId, TechnicianId,
};
use crate::error::{FleetError, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EnterDockCommand {
    pub station_id: StationId,
    pub dock_id: DockId,
    pub repairer: TechnicianId,
}

#[derive(Debug, Clone)]
pub struct ExitDockCommand {
    pub dock_id: DockId,
    pub station_id: Option<StationId>,
    pub repairer: TechnicianId,
    pub destination: String,
}

/// Dock Lifecycle Manager: registration, updates, soft delete, the physical
/// lock/unlock pair, action-based status changes, and station entry/exit.
pub struct DockService<S, D, N> {
    store: S,
    directory: D,
    notifier: N,
}

impl<S, D, N> DockService<S, D, N>
where
    S: EquipmentStore + Sync,
    D: DirectoryClient + Sync,
    N: Notifier + Sync,
{
    #[must_use]
    pub const fn new(store: S, directory: D, notifier: N) -> Self {
        Self {
            store,
            directory,
            notifier,
        }
    }

    /// Register a dock. Two-phase persist: the first save yields the id, the
    /// second carries the derived number.
    ///
    /// # Errors
    /// Returns `FleetError::Validation` on blank required fields.
    pub async fn register(&self, attrs: NewDock) -> Result<Dock> {
        let dock = Dock::new(attrs)?;
        let mut dock = self.store.insert_dock(dock).await?;
        dock.assign_number()?;
        self.store.save_dock(&dock).await?;
        info!(number = dock.number(), "registered dock in status NEW");
        Ok(dock)
    }

    /// Every dock in the fleet, excluded ones included.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn list(&self) -> Result<Vec<Dock>> {
        self.store.list_docks().await
    }

    /// # Errors
    /// Returns `FleetError::NotFound` when the dock does not exist.
    pub async fn get(&self, id: DockId) -> Result<Dock> {
        self.store
            .get_dock(id)
            .await?
            .ok_or_else(|| FleetError::NotFound("dock not found".to_string()))
    }

    /// # Errors
    /// Returns `FleetError::NotFound` when absent and `FleetError::Validation`
    /// on immutable-field changes or blank required fields.
    pub async fn update(&self, id: DockId, update: DockUpdate) -> Result<Dock> {
        let mut dock = self.get(id).await?;
        dock.apply_update(&update)?;
        self.store.save_dock(&dock).await?;
        Ok(dock)
    }

    /// Soft delete. A dock still holding a bicycle stays in the fleet.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` when a bicycle is bound.
    pub async fn delete(&self, id: DockId) -> Result<()> {
        let mut dock = self.get(id).await?;
        dock.exclude()?;
        self.store.save_dock(&dock).await?;
        info!(dock = id.value(), "dock excluded");
        Ok(())
    }

    /// Engage the lock, optionally docking a bicycle in the same motion. A
    /// bicycle already held by another dock cannot be docked here.
    ///
    /// # Errors
    /// Returns `NotFound` for missing equipment and `Precondition` on state
    /// or exclusivity violations. Nothing is persisted on rejection.
    pub async fn lock(&self, dock_id: DockId, bicycle_id: Option<BicycleId>) -> Result<Dock> {
        let mut dock = self.get(dock_id).await?;
        dock.lock()?;

        if let Some(bicycle_id) = bicycle_id {
            let mut bicycle = self
                .store
                .get_bicycle(bicycle_id)
                .await?
                .ok_or_else(|| FleetError::NotFound("bicycle not found".to_string()))?;
            if let Some(holder) = self.store.dock_holding_bicycle(bicycle_id).await? {
                if holder != dock_id {
                    warn!(
                        bicycle = bicycle_id.value(),
                        held_by = holder.value(),
                        "exclusivity violation on lock"
                    );
                    return Err(FleetError::Precondition(
                        "the bicycle is already held by another dock".to_string(),
                    ));
                }
            }
            bicycle.mark_available();
            dock.bind_bicycle(bicycle_id);
            self.store.save_bicycle_and_dock(&bicycle, &dock).await?;
        } else {
            self.store.save_dock(&dock).await?;
        }
        info!(
            dock = dock_id.value(),
            bicycle = bicycle_id.map(BicycleId::value),
            "dock locked"
        );
        Ok(dock)
    }

    /// Release the lock. When a bicycle id is informed it must match the one
    /// held; the held bicycle is unbound and becomes available again.
    ///
    /// # Errors
    /// Returns `NotFound` for a missing dock and `Precondition` on state or
    /// binding mismatches. Nothing is persisted on rejection.
    pub async fn unlock(&self, dock_id: DockId, bicycle_id: Option<BicycleId>) -> Result<Dock> {
        let mut dock = self.get(dock_id).await?;
        dock.unlock()?;

        match (dock.bicycle(), bicycle_id) {
            (None, Some(_)) => {
                return Err(FleetError::Precondition(
                    "no bicycle is held by this dock".to_string(),
                ));
            }
            (Some(bound), Some(given)) if bound != given => {
                return Err(FleetError::Precondition(
                    "the bicycle informed does not correspond to the bicycle held by the dock"
                        .to_string(),
                ));
            }
            _ => {}
        }

        if let Some(bound) = dock.bicycle() {
            let mut bicycle = self.store.get_bicycle(bound).await?.ok_or_else(|| {
                FleetError::Internal(format!("dock references missing bicycle {bound}"))
            })?;
            bicycle.mark_available();
            dock.release_bicycle();
            self.store.save_bicycle_and_dock(&bicycle, &dock).await?;
        } else {
            self.store.save_dock(&dock).await?;
        }
        info!(dock = dock_id.value(), "dock unlocked");
        Ok(dock)
    }

    /// Action-based status change. LOCK and UNLOCK go through the guarded
    /// transitions; REPAIR_REQUESTED and RETIRED are administrative overrides.
    ///
    /// # Errors
    /// Returns `FleetError::Validation` on a blank or unknown action and
    /// `FleetError::Precondition` when a guarded transition is rejected.
    pub async fn change_status(&self, id: DockId, action: &str) -> Result<Dock> {
        let mut dock = self.get(id).await?;
        if action.trim().is_empty() {
            return Err(FleetError::Validation("action not informed".to_string()));
        }
        let action = DockAction::try_from(action).map_err(FleetError::Validation)?;
        match action {
            DockAction::Lock => dock.lock()?,
            DockAction::Unlock => dock.unlock()?,
            DockAction::RepairRequested => {
                dock.set_status_unchecked(DockStatus::RepairRequested);
            }
            DockAction::Retired => dock.set_status_unchecked(DockStatus::Retired),
        }
        self.store.save_dock(&dock).await?;
        info!(
            dock = id.value(),
            status = dock.status().as_str(),
            "dock status changed"
        );
        Ok(dock)
    }

    /// Install a dock at a station. NEW and IN_REPAIR docks are accepted; a
    /// dock under repair must be returned by the technician who took it out.
    /// The dock comes back FREE, ready to receive a bicycle.
    ///
    /// # Errors
    /// Returns `NotFound` for missing equipment, `Validation` for an unknown
    /// repairer, `Precondition` on state or custody violations and
    /// `Dependency` when the post-commit notification fails.
    pub async fn enter_network(&self, command: EnterDockCommand) -> Result<()> {
        let station = self
            .store
            .get_station(command.station_id)
            .await?
            .ok_or_else(|| FleetError::NotFound("station not found".to_string()))?;
        let mut dock = self.get(command.dock_id).await?;

        let employee = self
            .directory
            .resolve_employee(&command.repairer)
            .await
            .map_err(|error| {
                warn!(repairer = %command.repairer, %error, "repairer lookup failed");
                FleetError::Validation("the informed repairer does not exist".to_string())
            })?;

        dock.return_to_network(command.station_id, &command.repairer)?;

        self.store.save_dock_and_station(&dock, &station).await?;
        info!(
            dock = command.dock_id.value(),
            station = command.station_id.value(),
            "dock entered the network"
        );

        self.notify(
            &employee,
            "Dock entered the network",
            format!(
                "Dock {} is now installed at station {} ({}).",
                dock.number().unwrap_or("?"),
                command.station_id.value(),
                station.location(),
            ),
        )
        .await
    }

    /// Remove a dock from its station toward a repair bench or retirement.
    /// Requires a pending repair request and an empty dock.
    ///
    /// # Errors
    /// Returns `NotFound` for a missing dock, `Validation` for an unknown
    /// destination, `Precondition` on ownership, binding or status violations
    /// and `Dependency` when the post-commit notification fails.
    pub async fn exit_network(&self, command: ExitDockCommand) -> Result<()> {
        let mut dock = self.get(command.dock_id).await?;

        if let Some(station_id) = command.station_id {
            if dock.station() != Some(station_id) {
                return Err(FleetError::Precondition(
                    "the dock is not installed at the informed station".to_string(),
                ));
            }
        }
        if dock.bicycle().is_some() {
            return Err(FleetError::Precondition(
                "a dock holding a bicycle cannot be withdrawn".to_string(),
            ));
        }
        let destination = RepairDestination::try_from(command.destination.as_str())
            .map_err(FleetError::Validation)?;

        dock.withdraw_for(destination, &command.repairer)?;

        self.store.save_dock(&dock).await?;
        info!(
            dock = command.dock_id.value(),
            destination = destination.as_str(),
            "dock left the network"
        );

        let employee = self
            .directory
            .resolve_employee(&command.repairer)
            .await
            .map_err(|error| {
                FleetError::Dependency(format!("repairer lookup after withdrawal failed: {error}"))
            })?;
        self.notify(
            &employee,
            "Dock left the network",
            format!(
                "Dock {} was withdrawn toward {}.",
                dock.number().unwrap_or("?"),
                destination.as_str(),
            ),
        )
        .await
    }

    /// The bicycle currently held by a dock.
    ///
    /// # Errors
    /// Returns `FleetError::NotFound` for a missing dock or an empty one.
    pub async fn bicycle_at_dock(&self, id: DockId) -> Result<Bicycle> {
        let dock = self.get(id).await?;
        let Some(bound) = dock.bicycle() else {
            return Err(FleetError::NotFound(
                "no bicycle is held by this dock".to_string(),
            ));
        };
        self.store.get_bicycle(bound).await?.ok_or_else(|| {
            FleetError::Internal(format!("dock references missing bicycle {bound}"))
        })
    }

    // Notification strictly follows a successful commit; a failure here never
    // rolls the transition back.
    async fn notify(&self, employee: &Employee, subject: &str, body: String) -> Result<()> {
        self.notifier
            .send(Notification {
                recipient: employee.email.clone(),
                subject: subject.to_string(),
                body,
            })
            .await
            .map_err(|error| FleetError::Dependency(format!("notification failed: {error}")))
    }
}
