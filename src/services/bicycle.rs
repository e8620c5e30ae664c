#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::ports::{DirectoryClient, Employee, EquipmentStore, Notification, Notifier};
use crate::domain::{
    Bicycle, BicycleId, BicycleStatus, BicycleUpdate, DockId, NewBicycle, RepairDestination,
    TechnicianId,
};
use crate::error::{FleetError, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EnterBicycleCommand {
    pub bicycle_id: BicycleId,
    pub dock_id: DockId,
    pub repairer: TechnicianId,
}

#[derive(Debug, Clone)]
pub struct ExitBicycleCommand {
    pub dock_id: DockId,
    pub bicycle_id: Option<BicycleId>,
    pub repairer: TechnicianId,
    pub destination: String,
}

/// Bicycle Lifecycle Manager: registration, updates, soft delete, the
/// administrative status bypass, and network entry/exit against a dock.
pub struct BicycleService<S, D, N> {
    store: S,
    directory: D,
    notifier: N,
}

impl<S, D, N> BicycleService<S, D, N>
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

    /// Register a bicycle. Two-phase persist: the first save yields the id,
    /// the second carries the derived number.
    ///
    /// # Errors
    /// Returns `FleetError::Validation` on blank required fields.
    pub async fn register(&self, attrs: NewBicycle) -> Result<Bicycle> {
        let bicycle = Bicycle::new(attrs)?;
        let mut bicycle = self.store.insert_bicycle(bicycle).await?;
        bicycle.assign_number()?;
        self.store.save_bicycle(&bicycle).await?;
        info!(
            number = bicycle.number(),
            "registered bicycle in status NEW"
        );
        Ok(bicycle)
    }

    /// Every bicycle in the fleet, excluded ones included.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn list(&self) -> Result<Vec<Bicycle>> {
        self.store.list_bicycles().await
    }

    /// # Errors
    /// Returns `FleetError::NotFound` when the bicycle does not exist.
    pub async fn get(&self, id: BicycleId) -> Result<Bicycle> {
        self.store
            .get_bicycle(id)
            .await?
            .ok_or_else(|| FleetError::NotFound("bicycle not found".to_string()))
    }

    /// # Errors
    /// Returns `FleetError::NotFound` when absent and `FleetError::Validation`
    /// on immutable-field changes or blank required fields.
    pub async fn update(&self, id: BicycleId, update: BicycleUpdate) -> Result<Bicycle> {
        let mut bicycle = self.get(id).await?;
        bicycle.apply_update(&update)?;
        self.store.save_bicycle(&bicycle).await?;
        Ok(bicycle)
    }

    /// Soft delete: only a retired bicycle held by no dock can be excluded.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` when the status is not RETIRED or a
    /// dock still holds the bicycle.
    pub async fn delete(&self, id: BicycleId) -> Result<()> {
        let mut bicycle = self.get(id).await?;
        if self.store.dock_holding_bicycle(id).await?.is_some() {
            return Err(FleetError::Precondition(
                "a bicycle bound to a dock cannot be excluded".to_string(),
            ));
        }
        bicycle.exclude()?;
        self.store.save_bicycle(&bicycle).await?;
        info!(bicycle = id.value(), "bicycle excluded");
        Ok(())
    }

    /// Administrative bypass: parses the action as a status name and applies
    /// it with no transition-table check.
    ///
    /// # Errors
    /// Returns `FleetError::Validation` on a blank or unparseable action.
    pub async fn change_status(&self, id: BicycleId, action: &str) -> Result<Bicycle> {
        let mut bicycle = self.get(id).await?;
        if action.trim().is_empty() {
            return Err(FleetError::Validation("action not informed".to_string()));
        }
        let status = BicycleStatus::try_from(action).map_err(FleetError::Validation)?;
        bicycle.set_status_unchecked(status);
        self.store.save_bicycle(&bicycle).await?;
        info!(
            bicycle = id.value(),
            status = status.as_str(),
            "administrative status change"
        );
        Ok(bicycle)
    }

    /// Put a bicycle into circulation through a free dock. NEW and IN_REPAIR
    /// bicycles are accepted; a bicycle under repair must be returned by the
    /// technician who took it out. The dock's lock status is not touched, only
    /// its binding.
    ///
    /// # Errors
    /// Returns `NotFound` for missing equipment, `Validation` for an unknown
    /// repairer, `Precondition` on state or custody violations and
    /// `Dependency` when the post-commit notification fails.
    pub async fn enter_network(&self, command: EnterBicycleCommand) -> Result<()> {
        let mut bicycle = self.get(command.bicycle_id).await?;
        let mut dock = self
            .store
            .get_dock(command.dock_id)
            .await?
            .ok_or_else(|| FleetError::NotFound("dock not found".to_string()))?;

        let employee = self
            .directory
            .resolve_employee(&command.repairer)
            .await
            .map_err(|error| {
                warn!(repairer = %command.repairer, %error, "repairer lookup failed");
                FleetError::Validation("the informed repairer does not exist".to_string())
            })?;

        bicycle.return_to_network(&command.repairer)?;
        dock.receive_bicycle(command.bicycle_id)?;

        self.store.save_bicycle_and_dock(&bicycle, &dock).await?;
        info!(
            bicycle = command.bicycle_id.value(),
            dock = command.dock_id.value(),
            "bicycle entered the network"
        );

        self.notify(
            &employee,
            "Bicycle entered the network",
            format!(
                "Bicycle {} is now available at dock {}.",
                bicycle.number().unwrap_or("?"),
                dock.number().unwrap_or("?"),
            ),
        )
        .await
    }

    /// Take a bicycle out of circulation from its dock, either to a repair
    /// bench (custody assigned to the repairer) or to retirement.
    ///
    /// # Errors
    /// Returns `NotFound` for a missing dock, `Validation` for an unknown
    /// destination, `Precondition` on binding or status violations and
    /// `Dependency` when the post-commit notification fails.
    pub async fn exit_network(&self, command: ExitBicycleCommand) -> Result<()> {
        let mut dock = self
            .store
            .get_dock(command.dock_id)
            .await?
            .ok_or_else(|| FleetError::NotFound("dock not found".to_string()))?;

        let Some(bound) = dock.bicycle() else {
            return Err(FleetError::Precondition(
                "no bicycle is held by this dock".to_string(),
            ));
        };
        if let Some(given) = command.bicycle_id {
            if given != bound {
                return Err(FleetError::Precondition(
                    "the bicycle informed does not correspond to the bicycle held by the dock"
                        .to_string(),
                ));
            }
        }
        let destination = RepairDestination::try_from(command.destination.as_str())
            .map_err(FleetError::Validation)?;

        let mut bicycle = self.store.get_bicycle(bound).await?.ok_or_else(|| {
            FleetError::Internal(format!("dock references missing bicycle {bound}"))
        })?;
        bicycle.withdraw_for(destination, &command.repairer)?;
        dock.release_bicycle();

        self.store.save_bicycle_and_dock(&bicycle, &dock).await?;
        info!(
            bicycle = bound.value(),
            dock = command.dock_id.value(),
            destination = destination.as_str(),
            "bicycle left the network"
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
            "Bicycle left the network",
            format!(
                "Bicycle {} was withdrawn from dock {} toward {}.",
                bicycle.number().unwrap_or("?"),
                dock.number().unwrap_or("?"),
                destination.as_str(),
            ),
        )
        .await
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
