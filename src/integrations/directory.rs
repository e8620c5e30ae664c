#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::TechnicianId;
use crate::error::{FleetError, Result};
use crate::services::ports::{DirectoryClient, Employee, PortFuture};
use serde::Deserialize;
use std::time::Duration;

/// Wire shape of the employee directory response. The upstream service keeps
/// its original Portuguese field names.
#[derive(Debug, Deserialize)]
struct EmployeePayload {
    matricula: String,
    nome: String,
    email: String,
}

/// HTTP client for the employee directory service.
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectoryClient {
    /// # Errors
    /// Returns [`FleetError::Dependency`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|error| {
                FleetError::Dependency(format!("failed to build directory client: {error}"))
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_employee(&self, registration: &TechnicianId) -> Result<Employee> {
        let url = format!("{}/funcionario/{}", self.base_url, registration.value());
        let response = self.client.get(&url).send().await.map_err(|error| {
            FleetError::Dependency(format!("employee directory unreachable: {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FleetError::Dependency(format!(
                "employee directory returned HTTP {status} for {}",
                registration.value()
            )));
        }

        let payload: EmployeePayload = response.json().await.map_err(|error| {
            FleetError::Dependency(format!("malformed employee directory response: {error}"))
        })?;
        Ok(Employee {
            registration: payload.matricula,
            name: payload.nome,
            email: payload.email,
        })
    }
}

impl DirectoryClient for HttpDirectoryClient {
    fn resolve_employee<'a>(&'a self, registration: &'a TechnicianId) -> PortFuture<'a, Employee> {
        Box::pin(self.fetch_employee(registration))
    }
}
