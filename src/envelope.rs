//! Input envelope decoding and validation

use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::{Error, Result, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_SECONDS, MIN_TIMEOUT_SECONDS};

/// Incoming envelope: `{ request, timeoutMs? }`
///
/// Both fields are decoded as raw JSON values so validation failures can be
/// reported with the precise cause (and with the node hash, when the request
/// itself is well-formed enough to carry one). Unknown extra fields are
/// ignored; a non-object top level fails the decode outright.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    request: Option<Value>,
    timeout_ms: Option<Value>,
}

/// A validated call ready for dispatch
#[derive(Debug, Clone)]
pub struct SolverCall {
    /// Request body forwarded verbatim to the service
    pub request: Map<String, Value>,
    /// `nodeHash` lifted out of the request for diagnostics
    pub node_hash: Option<String>,
    /// Clamped solve deadline
    pub timeout: Duration,
}

impl Envelope {
    /// Decode the raw input stream into an envelope
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Node hash, when `request` is an object carrying a string `nodeHash`
    pub fn node_hash(&self) -> Option<String> {
        self.request
            .as_ref()?
            .get("nodeHash")?
            .as_str()
            .map(str::to_owned)
    }

    /// Check structural preconditions and produce a dispatchable call
    ///
    /// The `request` check runs first: a missing request wins over a bad
    /// timeout.
    pub fn into_call(self) -> Result<SolverCall> {
        let node_hash = self.node_hash();

        let request = match self.request {
            Some(Value::Object(map)) => map,
            _ => return Err(Error::MissingRequest),
        };

        let timeout_ms = match self.timeout_ms {
            None => DEFAULT_TIMEOUT_MS,
            Some(value) => value.as_f64().ok_or(Error::NonNumericTimeout)?,
        };

        let seconds = (timeout_ms / 1000.0).clamp(MIN_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS);

        Ok(SolverCall {
            request,
            node_hash,
            timeout: Duration::from_secs_f64(seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(payload: Value) -> Result<SolverCall> {
        Envelope::decode(&payload.to_string()).and_then(Envelope::into_call)
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        for raw in ["", "not json", "[1, 2]", "\"request\"", "42", "{\"request\":"] {
            let err = Envelope::decode(raw).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "input {raw:?}");
        }
    }

    #[test]
    fn test_missing_request_fails_regardless_of_timeout() {
        for payload in [
            json!({}),
            json!({ "timeoutMs": 250 }),
            json!({ "request": null }),
            json!({ "request": "node-1" }),
            json!({ "request": [1, 2], "timeoutMs": "bogus" }),
        ] {
            let err = call(payload).unwrap_err();
            assert!(matches!(err, Error::MissingRequest));
        }
    }

    #[test]
    fn test_node_hash_extraction() {
        let envelope =
            Envelope::decode(&json!({ "request": { "nodeHash": "abc123" } }).to_string()).unwrap();
        assert_eq!(envelope.node_hash(), Some("abc123".to_string()));

        // Not an object: nothing to extract
        let envelope = Envelope::decode(&json!({ "request": "abc123" }).to_string()).unwrap();
        assert_eq!(envelope.node_hash(), None);

        // Non-string hash is treated as absent
        let envelope =
            Envelope::decode(&json!({ "request": { "nodeHash": 7 } }).to_string()).unwrap();
        assert_eq!(envelope.node_hash(), None);
    }

    #[test]
    fn test_timeout_defaults_to_one_second() {
        let call = call(json!({ "request": {} })).unwrap();
        assert_eq!(call.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        for timeout in [json!("500"), json!(true), json!([500]), json!({ "ms": 500 })] {
            let err = call(json!({ "request": {}, "timeoutMs": timeout })).unwrap_err();
            assert!(matches!(err, Error::NonNumericTimeout));
            assert!(err.to_string().contains("numeric"));
        }
    }

    #[test]
    fn test_timeout_clamped_to_one_millisecond() {
        for timeout_ms in [0, -1, -50_000] {
            let call = call(json!({ "request": {}, "timeoutMs": timeout_ms })).unwrap();
            assert_eq!(call.timeout, Duration::from_millis(1));
        }
    }

    #[test]
    fn test_huge_timeout_still_converts() {
        let call = call(json!({ "request": {}, "timeoutMs": 1e308 })).unwrap();
        assert_eq!(call.timeout, Duration::from_secs_f64(MAX_TIMEOUT_SECONDS));
    }

    #[test]
    fn test_fractional_timeout() {
        let call = call(json!({ "request": {}, "timeoutMs": 250.5 })).unwrap();
        assert_eq!(call.timeout, Duration::from_secs_f64(0.2505));
    }

    #[test]
    fn test_request_passes_through_untouched() {
        let request = json!({
            "provider": "openspiel",
            "nodeHash": "h42",
            "state": { "street": "turn", "board": ["Ah", "Kd", "7c", "2s"], "potBb": 12.5 },
            "actionHistory": [{ "actor": "hero", "action": "bet", "sizeBb": 3.0 }],
        });
        let call = call(json!({ "request": request, "timeoutMs": 800 })).unwrap();
        assert_eq!(Value::Object(call.request), request);
        assert_eq!(call.node_hash, Some("h42".to_string()));
    }
}
