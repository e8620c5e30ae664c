#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const NOTFOUND: &str = "NOTFOUND";
    pub const INVALID: &str = "INVALID";
    pub const CONFLICT: &str = "CONFLICT";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("External dependency failed: {0}")]
    Dependency(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FleetError {
    /// Returns the protocol error code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => code::NOTFOUND,
            Self::Validation(_) | Self::ConfigError(_) | Self::SerializationError(_) => {
                code::INVALID
            }
            Self::Precondition(_) => code::CONFLICT,
            Self::Dependency(_) | Self::IoError(_) => code::DEPENDENCY,
            Self::Database(_) | Self::SqlxError(_) | Self::Internal(_) => code::INTERNAL,
        }
    }

    /// Returns the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError(_) => 2,
            Self::Database(_) | Self::SqlxError(_) => 3,
            Self::NotFound(_) => 4,
            Self::Validation(_) => 5,
            Self::Precondition(_) => 6,
            Self::Dependency(_) => 7,
            Self::IoError(_) | Self::SerializationError(_) => 8,
            Self::Internal(_) => 9,
        }
    }
}

/// Protocol error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'dockfleet help' for valid options",
    ),
    (
        code::NOTFOUND,
        "Referenced equipment was not found",
        "List equipment and verify the identifier",
    ),
    (
        code::INVALID,
        "Invalid or missing field",
        "Check required fields and immutable attributes",
    ),
    (
        code::CONFLICT,
        "Equipment is in the wrong state for this transition",
        "Inspect current status before retrying",
    ),
    (
        code::DEPENDENCY,
        "Directory or notification service call failed",
        "Verify the external service is reachable and retry",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, FleetError>;
