#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{FleetError, Result};
use crate::services::ports::{Notification, Notifier, PortFuture};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the mail dispatch service. The upstream endpoint keeps its
/// original Portuguese contract (`/enviarEmail` with email/assunto/mensagem).
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotifier {
    /// # Errors
    /// Returns [`FleetError::Dependency`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|error| {
                FleetError::Dependency(format!("failed to build notifier client: {error}"))
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn dispatch(&self, notification: Notification) -> Result<()> {
        let url = format!("{}/enviarEmail", self.base_url);
        let body = serde_json::json!({
            "email": notification.recipient,
            "assunto": notification.subject,
            "mensagem": notification.body,
        });
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                FleetError::Dependency(format!("mail dispatcher unreachable: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FleetError::Dependency(format!(
                "mail dispatcher returned HTTP {status}"
            )));
        }
        debug!(recipient = %notification.recipient, "notification dispatched");
        Ok(())
    }
}

impl Notifier for HttpNotifier {
    fn send(&self, notification: Notification) -> PortFuture<'_, ()> {
        Box::pin(self.dispatch(notification))
    }
}
