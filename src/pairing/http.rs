//! Blocking HTTP client for the pairing service.
//!
//! Runs on the dispatcher's worker thread, never on the UI thread.

use super::{ErrorBody, Outfit, PairingRequest, PairingResponse, PairingService};
use crate::config::Settings;
use crate::error::PairingError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpPairingService {
    client: Client,
    endpoint: String,
}

impl HttpPairingService {
    /// Build a client with the connect and total timeouts from `settings`.
    pub fn new(settings: &Settings) -> Result<Self, PairingError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.pair_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PairingService for HttpPairingService {
    fn submit_answers(&self, request: &PairingRequest) -> Result<Outfit, PairingError> {
        debug!("POST {} {:?}", self.endpoint, request);

        let response = self.client.post(&self.endpoint).json(request).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!("Pairing service rejected request: {} {}", status, message);
            return Err(PairingError::Status {
                code: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Err(PairingError::Malformed("empty response body".to_string()));
        }

        let parsed: PairingResponse =
            serde_json::from_str(&body).map_err(|e| PairingError::Malformed(e.to_string()))?;
        Ok(parsed.best_outfit)
    }
}
