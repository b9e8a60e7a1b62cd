//! Solving service connector

use reqwest::Client;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::{config::BridgeConfig, Error, Result};

/// HTTP connector for the solving service
///
/// The endpoint is threaded in at construction; nothing is read ambiently at
/// call time. Exactly one network call is made per invocation; retries are
/// the caller's decision.
pub struct SolverClient {
    config: BridgeConfig,
    client: Client,
}

impl SolverClient {
    /// Create a new connector from configuration
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Internal(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// POST the request to the service, bounded by the computed deadline
    ///
    /// Returns the service's JSON body on 2xx; every other outcome becomes
    /// the matching [`Error`] variant for the outcome mapper.
    pub async fn solve(&self, request: &Map<String, Value>, timeout: Duration) -> Result<Value> {
        let body = serde_json::to_vec(request).map_err(|e| Error::Internal(e.to_string()))?;

        info!(
            "Dispatching solve request to {} with {}ms deadline",
            self.config.service_url,
            timeout.as_millis()
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.config.service_url)
            .header("Content-Type", "application/json")
            .body(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Service rejected solve request: {}", status);
            return Err(Error::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let text = response.text().await.map_err(classify_transport_error)?;
        let parsed = serde_json::from_str(&text)
            .map_err(|e| Error::Internal(format!("service returned unparseable body: {e}")))?;

        info!("Solve completed in {}ms", start.elapsed().as_millis());
        Ok(parsed)
    }
}

/// Deadline expiry surfaces as its own error; everything else at this layer
/// is a transport failure (DNS, connection refused, reset).
fn classify_transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(err.to_string())
    }
}
