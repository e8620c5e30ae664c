#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::ids::{BicycleId, TechnicianId};
use crate::domain::repair::RepairDestination;
use crate::error::{FleetError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BicycleStatus {
    New,
    Available,
    InUse,
    RepairRequested,
    InRepair,
    Retired,
    Excluded,
}

impl BicycleStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::RepairRequested => "repair_requested",
            Self::InRepair => "in_repair",
            Self::Retired => "retired",
            Self::Excluded => "excluded",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Retired | Self::Excluded)
    }
}

impl TryFrom<&str> for BicycleStatus {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        // Legacy wire spellings from the original fleet devices remain valid.
        match s.to_uppercase().as_str() {
            "NEW" | "NOVA" => Ok(Self::New),
            "AVAILABLE" | "DISPONIVEL" => Ok(Self::Available),
            "IN_USE" | "EM_USO" => Ok(Self::InUse),
            "REPAIR_REQUESTED" | "REPARO_SOLICITADO" => Ok(Self::RepairRequested),
            "IN_REPAIR" | "EM_REPARO" => Ok(Self::InRepair),
            "RETIRED" | "APOSENTADA" => Ok(Self::Retired),
            "EXCLUDED" | "EXCLUIDA" => Ok(Self::Excluded),
            _ => Err(format!(
                "invalid status: {s}. Use NEW, AVAILABLE, IN_USE, REPAIR_REQUESTED, IN_REPAIR, RETIRED or EXCLUDED"
            )),
        }
    }
}

/// Attributes required to register a bicycle.
#[derive(Debug, Clone)]
pub struct NewBicycle {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub location: Option<String>,
}

/// Payload of a plain update. Number and status are immutable through this
/// path; carrying them lets the entity reject change attempts explicitly.
#[derive(Debug, Clone)]
pub struct BicycleUpdate {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub location: Option<String>,
    pub number: Option<String>,
    pub status: Option<BicycleStatus>,
}

/// The tracked vehicle asset. Status only moves through the transition
/// methods below; `set_status_unchecked` is the single administrative bypass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bicycle {
    id: Option<BicycleId>,
    number: Option<String>,
    status: BicycleStatus,
    brand: String,
    model: String,
    year: String,
    location: Option<String>,
    repairer: Option<TechnicianId>,
}

impl Bicycle {
    /// # Errors
    /// Returns `FleetError::Validation` when brand, model or year are blank.
    pub fn new(attrs: NewBicycle) -> Result<Self> {
        if attrs.brand.trim().is_empty()
            || attrs.model.trim().is_empty()
            || attrs.year.trim().is_empty()
        {
            return Err(FleetError::Validation(
                "brand, model and year are required to register a bicycle".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            number: None,
            status: BicycleStatus::New,
            brand: attrs.brand,
            model: attrs.model,
            year: attrs.year,
            location: attrs.location,
            repairer: None,
        })
    }

    /// Rebuild a bicycle from stored fields. Hydration path for store
    /// implementations; does not re-check registration invariants.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn from_parts(
        id: Option<BicycleId>,
        number: Option<String>,
        status: BicycleStatus,
        brand: String,
        model: String,
        year: String,
        location: Option<String>,
        repairer: Option<TechnicianId>,
    ) -> Self {
        Self {
            id,
            number,
            status,
            brand,
            model,
            year,
            location,
            repairer,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<BicycleId> {
        self.id
    }

    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    #[must_use]
    pub const fn status(&self) -> BicycleStatus {
        self.status
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
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

    pub(crate) fn set_id(&mut self, id: BicycleId) {
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
            .ok_or_else(|| FleetError::Internal("bicycle has no id yet".to_string()))?;
        if self.number.is_some() {
            return Err(FleetError::Validation(
                "the bicycle number is assigned exactly once and cannot change".to_string(),
            ));
        }
        self.number = Some(format!("BIC-{}", id.value()));
        Ok(())
    }

    /// Overwrite the descriptive attributes. Number and status are immutable
    /// through this path.
    ///
    /// # Errors
    /// Returns `FleetError::Validation` on blank required fields or on an
    /// attempt to change the number or the status.
    pub fn apply_update(&mut self, update: &BicycleUpdate) -> Result<()> {
        if update.brand.trim().is_empty()
            || update.model.trim().is_empty()
            || update.year.trim().is_empty()
        {
            return Err(FleetError::Validation(
                "brand, model and year are required".to_string(),
            ));
        }
        if update.number.is_some() && update.number.as_deref() != self.number.as_deref() {
            return Err(FleetError::Validation(
                "the bicycle number cannot be changed".to_string(),
            ));
        }
        if let Some(status) = update.status {
            if status != self.status {
                return Err(FleetError::Validation(
                    "the bicycle status cannot be changed by a plain update".to_string(),
                ));
            }
        }
        self.brand = update.brand.clone();
        self.model = update.model.clone();
        self.year = update.year.clone();
        self.location = update.location.clone();
        Ok(())
    }

    /// Bring the bicycle back into circulation: NEW or IN_REPAIR becomes
    /// AVAILABLE and any repair custody is released. A bicycle under repair
    /// must be returned by the technician who took it out.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` when the status or the custody
    /// continuity rule is violated.
    pub fn return_to_network(&mut self, repairer: &TechnicianId) -> Result<()> {
        match self.status {
            BicycleStatus::New => {}
            BicycleStatus::InRepair => {
                let Some(holder) = self.repairer.as_ref() else {
                    return Err(FleetError::Precondition(
                        "bicycle under repair has no repairer assigned".to_string(),
                    ));
                };
                if holder != repairer {
                    return Err(FleetError::Precondition(
                        "the repairer returning the bicycle is not the one who took it for repair"
                            .to_string(),
                    ));
                }
            }
            _ => {
                return Err(FleetError::Precondition(
                    "bicycle must have status NEW or IN_REPAIR to enter the network".to_string(),
                ));
            }
        }
        self.status = BicycleStatus::Available;
        self.repairer = None;
        Ok(())
    }

    /// Pull the bicycle out of the network toward a repair destination.
    /// Requires a pending repair request.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` unless status is REPAIR_REQUESTED.
    pub fn withdraw_for(
        &mut self,
        destination: RepairDestination,
        repairer: &TechnicianId,
    ) -> Result<()> {
        if self.status != BicycleStatus::RepairRequested {
            return Err(FleetError::Precondition(
                "bicycle must have status REPAIR_REQUESTED to be withdrawn".to_string(),
            ));
        }
        match destination {
            RepairDestination::InRepair => {
                self.status = BicycleStatus::InRepair;
                self.repairer = Some(repairer.clone());
            }
            RepairDestination::Retired => {
                self.status = BicycleStatus::Retired;
                self.repairer = None;
            }
        }
        Ok(())
    }

    /// Soft delete. Only retired bicycles leave the fleet; the record stays
    /// retrievable with status EXCLUDED.
    ///
    /// # Errors
    /// Returns `FleetError::Precondition` unless status is RETIRED.
    pub fn exclude(&mut self) -> Result<()> {
        if self.status != BicycleStatus::Retired {
            return Err(FleetError::Precondition(
                "only retired bicycles can be excluded".to_string(),
            ));
        }
        self.status = BicycleStatus::Excluded;
        Ok(())
    }

    /// Mark the bicycle available without a transition check. Used when a
    /// dock locks onto it.
    pub fn mark_available(&mut self) {
        self.status = BicycleStatus::Available;
    }

    /// Administrative bypass: apply a status with no transition-table check.
    pub fn set_status_unchecked(&mut self, status: BicycleStatus) {
        self.status = status;
    }
}
