#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Where equipment withdrawn from the network goes: to a repair bench or out
/// of circulation for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairDestination {
    InRepair,
    Retired,
}

impl RepairDestination {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InRepair => "in_repair",
            Self::Retired => "retired",
        }
    }
}

impl TryFrom<&str> for RepairDestination {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        // Legacy wire spellings from the field devices are still accepted.
        match s.to_uppercase().as_str() {
            "IN_REPAIR" | "EM_REPARO" => Ok(Self::InRepair),
            "RETIRED" | "APOSENTADA" => Ok(Self::Retired),
            _ => Err(format!(
                "destination must be 'IN_REPAIR' or 'RETIRED', got: {s}"
            )),
        }
    }
}
