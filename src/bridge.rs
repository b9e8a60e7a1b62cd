//! Bridge pipeline: decode → validate → dispatch → map → encode

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    client::SolverClient, config::BridgeConfig, envelope::Envelope, error::SolverError, Error,
    Result,
};

/// Final reply written to the output channel
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BridgeReply {
    /// Service result forwarded as-is, shape unvalidated
    Result(Value),
    /// Normalized failure
    Error(SolverError),
}

impl BridgeReply {
    /// Encode as a single JSON document for the output channel
    ///
    /// A serialization failure here is an implementation bug, outside the
    /// normalized-error contract, and panics.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("bridge reply must serialize")
    }
}

/// The bridge pipeline
///
/// Stateless across calls; each [`Bridge::run`] is an independent
/// transaction. Control flows strictly downstream: a stage failure converts
/// to a [`SolverError`] and skips every later stage except encoding.
pub struct Bridge {
    client: SolverClient,
}

impl Bridge {
    /// Build a bridge with the endpoint threaded in from configuration
    pub fn new(config: BridgeConfig) -> Result<Self> {
        Ok(Self {
            client: SolverClient::new(config)?,
        })
    }

    /// Run one full invocation over the raw input payload
    pub async fn run(&self, raw: &str) -> BridgeReply {
        let envelope = match Envelope::decode(raw) {
            Ok(envelope) => envelope,
            Err(err) => return fail(err, None),
        };

        // Extracted before validation so a bad timeout still carries the hash
        let node_hash = envelope.node_hash();

        let call = match envelope.into_call() {
            Ok(call) => call,
            Err(err) => return fail(err, node_hash),
        };

        match self.client.solve(&call.request, call.timeout).await {
            Ok(result) => BridgeReply::Result(result),
            Err(err) => fail(err, call.node_hash),
        }
    }
}

fn fail(err: Error, node_hash: Option<String>) -> BridgeReply {
    warn!("Solve failed: {}", err);
    BridgeReply::Error(err.into_solver_error(node_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_encodes_without_wrapping() {
        let reply = BridgeReply::Result(json!({ "value": 42 }));
        assert_eq!(reply.encode(), r#"{"value":42}"#);
    }

    #[test]
    fn test_error_encodes_normalized_shape() {
        let reply = fail(Error::Timeout, Some("h9".to_string()));
        let json: Value = serde_json::from_str(&reply.encode()).unwrap();

        assert_eq!(json["ok"], json!(false));
        assert_eq!(json["code"], json!("SOLVER_TIMEOUT"));
        assert_eq!(json["message"], json!("request timed out"));
        assert_eq!(json["provider"], json!("openspiel"));
        assert_eq!(json["nodeHash"], json!("h9"));
        assert_eq!(json["retriable"], json!(true));
    }
}
