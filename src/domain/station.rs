#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::bicycle::BicycleStatus;
use crate::domain::ids::{BicycleId, StationId};
use crate::error::{FleetError, Result};
use serde::{Deserialize, Serialize};

/// A physical installation hosting docks at one location. Dock membership is
/// kept on the dock side; the station record carries only its own attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    id: Option<StationId>,
    location: String,
    description: String,
}

impl Station {
    /// # Errors
    /// Returns `FleetError::Validation` when location or description are blank.
    pub fn new(location: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let location = location.into();
        let description = description.into();
        if location.trim().is_empty() || description.trim().is_empty() {
            return Err(FleetError::Validation(
                "location and description are required".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            location,
            description,
        })
    }

    /// Rebuild a station from stored fields.
    #[must_use]
    pub const fn from_parts(id: Option<StationId>, location: String, description: String) -> Self {
        Self {
            id,
            location,
            description,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<StationId> {
        self.id
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn set_id(&mut self, id: StationId) {
        self.id = Some(id);
    }

    /// # Errors
    /// Returns `FleetError::Validation` when location or description are blank.
    pub fn apply_update(
        &mut self,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        let location = location.into();
        let description = description.into();
        if location.trim().is_empty() || description.trim().is_empty() {
            return Err(FleetError::Validation(
                "location and description are required".to_string(),
            ));
        }
        self.location = location;
        self.description = description;
        Ok(())
    }
}

/// Listing projection: station attributes plus how many docks it hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSummary {
    pub id: StationId,
    pub location: String,
    pub description: String,
    pub dock_count: usize,
}

/// Reduced bicycle view used when listing the bicycles docked at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BicycleAtStation {
    pub id: BicycleId,
    pub number: Option<String>,
    pub status: BicycleStatus,
}
