//! Bridge configuration

use config::{ConfigError, Environment};
use serde::Deserialize;
use std::env;

use crate::DEFAULT_SERVICE_URL;

/// Process-wide configuration, read once per invocation and never mutated
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Solving service endpoint receiving the POSTed request
    pub service_url: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("service_url", DEFAULT_SERVICE_URL)?
            .add_source(Environment::with_prefix("OPENSPIEL"));

        // The documented override used by the calling process
        if let Ok(url) = env::var("OPENSPIEL_SERVICE_URL") {
            builder = builder.set_override("service_url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Check the endpoint is usable before dispatch
    pub fn validate(&self) -> Result<(), String> {
        if self.service_url.is_empty() {
            return Err("Service URL is required".to_string());
        }

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            return Err(format!(
                "Service URL must be http(s), got {}",
                self.service_url
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = BridgeConfig::default();
        assert_eq!(config.service_url, "http://127.0.0.1:8787/solve");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoints() {
        let config = BridgeConfig {
            service_url: String::new(),
        };
        assert!(config.validate().is_err());

        let config = BridgeConfig {
            service_url: "ftp://127.0.0.1/solve".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
