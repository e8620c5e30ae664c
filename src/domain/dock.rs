#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::ids::{BicycleId, DockId, StationId, TechnicianId};
use crate::domain::repair::RepairDestination;
use crate::error::{FleetError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockStatus {
    New,
    Free,
    Occupied,
    RepairRequested,
    InRepair,
    Retired,
    Excluded,
}

impl DockStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Free => "free",
            Self::Occupied => "occupied",
            Self::RepairRequested => "repair_requested",
            Self::InRepair => "in_repair",
            Self::Retired => "retired",
            Self::Excluded => "excluded",
        }
    }
}

impl TryFrom<&str> for DockStatus {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        match s.to_uppercase().as_str() {
            "NEW" | "NOVA" => Ok(Self::New),
            "FREE" | "LIVRE" => Ok(Self::Free),
            "OCCUPIED" | "OCUPADA" => Ok(Self::Occupied),
            "REPAIR_REQUESTED" | "REPARO_SOLICITADO" => Ok(Self::RepairRequested),
            "IN_REPAIR" | "EM_REPARO" => Ok(Self::InRepair),
            "RETIRED" | "APOSENTADA" => Ok(Self::Retired),
            "EXCLUDED" | "EXCLUIDA" => Ok(Self::Excluded),
            _ => Err(format!(
                "invalid status: {s}. Use NEW, FREE, OCCUPIED, REPAIR_REQUESTED, IN_REPAIR, RETIRED or EXCLUDED"
            )),
        }
    }
}

/// Administrative status actions accepted by the dock status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockAction {
    Lock,
    Unlock,
    RepairRequested,
    Retired,
}

impl TryFrom<&str> for DockAction {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        match s.to_uppercase().as_str() {
            "LOCK" | "TRANCAR" => Ok(Self::Lock),
            "UNLOCK" | "DESTRANCAR" => Ok(Self::Unlock),
            "REPAIR_REQUESTED" | "REPARO_SOLICITADO" => Ok(Self::RepairRequested),
            "RETIRED" | "APOSENTADA" => Ok(Self::Retired),
            _ => Err(format!(
                "invalid action: {s}. Use LOCK, UNLOCK, REPAIR_REQUESTED or RETIRED"
            )),
        }
    }
}

/// Attributes required to register a dock.
#[derive(Debug, Clone)]
pub struct NewDock {
    pub model: String,
    pub year: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DockUpdate {
    pub model: String,
    pub year: String,
    pub location: Option<String>,
    pub number: Option<String>,
    pub status: Option<DockStatus>,
}

/// A locking unit. Holds at most one bicycle and belongs to at most one
/// station; both relations are independent and nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dock {
    id: Option<DockId>,
    number: Option<String>,
    status: DockStatus,
    model: String,
    year: String,
    location: Option<String>,
    repairer: Option<TechnicianId>,
    bicycle: Option<BicycleId>,
    station: Option<StationId>,
}

impl Dock {
    /// # Errors
    /// Returns `FleetError::Validation` when model or year are blank.
    pub fn new(attrs: NewDock) -> Result<Self> {
        if attrs.model.trim().is_empty() || attrs.year.trim().is_empty() {
            return Err(FleetError::Validation(
                "model and year are required to register a dock".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            number: None,
            status: DockStatus::New,
            model: attrs.model,
            year: attrs.year,
            location: attrs.location,
            repairer: None,
            bicycle: None,
            station: None,
        })
    }

    /// Rebuild a dock from stored fields. Hydration path for store
    /// implementations.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn from_parts(
        id: Option<DockId>,
        number: Option<String>,
        status: DockStatus,
        model: String,
        year: String,
        location: Option<String>,
        repairer: Option<TechnicianId>,
        bicycle: Option<BicycleId>,
        station: Option<StationId>,
    ) -> Self {
        Self {
            id,
            number,
            status,
            model,
            year,
            location,
            repairer,
            bicycle,
            station,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<DockId> {
        self.id
    }

    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    #[must_use]
    pub const fn status(&self) -> DockStatus {
        self.status
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub const fn repairer(&self) -> Option<&TechnicianId> {
        self.repairer.as_ref()
    }

    #[must_use]
    pub const fn bicycle(&self) -> Option<BicycleId> {
        self.bicycle
    }

    #[must_use]
    pub const fn station(&self) -> Option<StationId> {
        self.station
    }

    pub(crate) fn set_id(&mut self, id: DockId) {
        self.id = Some(id);
    }

    /// Derive the visible number from the store-assigned id. Assigned exactly
    /// once, at registration.
    ///
    /// # Errors
    /// Returns `FleetError::Internal` when no id has been assigned yet and
    /// `FleetError::Validation` when a number is already present.
    pub fn assign_number(&mut self) -> Result<()> {
        let id = self
            .id
            .ok_or_else(|| FleetError::Internal("dock has no id yet".to_string()))?;
        if self.number.is_some() {
            return Err(FleetError::Validation(
                "the dock number is assigned exactly once and cannot change".to_string(),
            ));
        }
        self.number = Some(format!("TR-{}", id.value()));
        Ok(())
    }

    /// # Errors
    /// Returns `FleetError::Validation` on blank required fields or on an
    /// attempt to change the number or the status.
    pub fn apply_update(&mut self, update: &DockUpdate) -> Result<()> {
        if update.model.trim().is_empty() || update.year.trim().is_empty() {
            return Err(FleetError::Validation(
                "model and year are required".to_string(),
            ));
        }
        if update.number.is_some() && update.number.as_deref() != self.number.as_deref() {
            return Err(FleetError::Validation(
                "the dock number cannot be changed".to_string(),
            ));
        }
        if let Some(status) = update.status {
            if status != self.status {
                return Err(FleetError::Validation(
                    "the dock status cannot be changed by a plain update".to_string(),
                ));
            }
        }
        self.model = update.model.clone();
        self.year = update.year.clone();
        self.location = update.location.clone();
        Ok(())
    }

    /// Physically engage the lock. Only a FREE dock can be locked.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` unless status is FREE.
    pub fn lock(&mut self) -> Result<()> {
        if self.status != DockStatus::Free {
            return Err(FleetError::Precondition(
                "the dock can only be locked when it is FREE".to_string(),
            ));
        }
        self.status = DockStatus::Occupied;
        Ok(())
    }

    /// Physically release the lock. Only an OCCUPIED dock can be unlocked.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` unless status is OCCUPIED.
    pub fn unlock(&mut self) -> Result<()> {
        if self.status != DockStatus::Occupied {
            return Err(FleetError::Precondition(
                "the dock can only be unlocked when it is OCCUPIED".to_string(),
            ));
        }
        self.status = DockStatus::Free;
        Ok(())
    }

    /// Bind a bicycle without touching the lock status. Used by network entry,
    /// where the binding changes but the dock stays as it was.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` unless status is FREE.
    pub fn receive_bicycle(&mut self, bicycle: BicycleId) -> Result<()> {
        if self.status != DockStatus::Free {
            return Err(FleetError::Precondition(
                "the dock must be FREE to receive a bicycle".to_string(),
            ));
        }
        self.bicycle = Some(bicycle);
        Ok(())
    }

    pub fn bind_bicycle(&mut self, bicycle: BicycleId) {
        self.bicycle = Some(bicycle);
    }

    /// Drop the bicycle binding and leave the dock free for the next one.
    pub fn release_bicycle(&mut self) {
        self.bicycle = None;
        self.status = DockStatus::Free;
    }

    /// Bind the dock to a station and make it usable: NEW or IN_REPAIR becomes
    /// FREE, repair custody is released. A dock under repair must be returned
    /// by the technician who took it out.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` when the status or the custody
    /// continuity rule is violated.
    pub fn return_to_network(&mut self, station: StationId, repairer: &TechnicianId) -> Result<()> {
        match self.status {
            DockStatus::New => {}
            DockStatus::InRepair => {
                let Some(holder) = self.repairer.as_ref() else {
                    return Err(FleetError::Precondition(
                        "dock under repair has no repairer assigned".to_string(),
                    ));
                };
                if holder != repairer {
                    return Err(FleetError::Precondition(
                        "the repairer returning the dock is not the one who took it for repair"
                            .to_string(),
                    ));
                }
            }
            _ => {
                return Err(FleetError::Precondition(
                    "dock must have status NEW or IN_REPAIR to enter the network".to_string(),
                ));
            }
        }
        self.station = Some(station);
        self.status = DockStatus::Free;
        self.repairer = None;
        Ok(())
    }

    /// Pull the dock out of its station toward a repair destination. Requires
    /// a pending repair request.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` unless status is REPAIR_REQUESTED.
    pub fn withdraw_for(
        &mut self,
        destination: RepairDestination,
        repairer: &TechnicianId,
    ) -> Result<()> {
        if self.status != DockStatus::RepairRequested {
            return Err(FleetError::Precondition(
                "dock must have status REPAIR_REQUESTED to be withdrawn".to_string(),
            ));
        }
        self.station = None;
        match destination {
            RepairDestination::InRepair => {
                self.status = DockStatus::InRepair;
                self.repairer = Some(repairer.clone());
            }
            RepairDestination::Retired => {
                self.status = DockStatus::Retired;
                self.repairer = None;
            }
        }
        Ok(())
    }

    /// Soft delete. A dock still holding a bicycle cannot leave the fleet.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` when a bicycle is bound.
    pub fn exclude(&mut self) -> Result<()> {
        if self.bicycle.is_some() {
            return Err(FleetError::Precondition(
                "a dock with a bound bicycle cannot be excluded".to_string(),
            ));
        }
        self.status = DockStatus::Excluded;
        Ok(())
    }

    /// Administrative bypass: apply a status with no transition-table check.
    pub fn set_status_unchecked(&mut self, status: DockStatus) {
        self.status = status;
    }
}
