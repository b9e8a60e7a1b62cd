//! # OpenSpiel Solver Bridge
//!
//! Stdin/stdout adapter between a calling process and an externally-running
//! OpenSpiel solving service. One invocation handles exactly one request:
//!
//! ```text
//! ┌─────────┐   ┌───────────┐   ┌────────────┐   ┌────────────┐   ┌─────────┐
//! │ Decoder │──▶│ Validator │──▶│ Dispatcher │──▶│   Outcome  │──▶│ Encoder │
//! │ (stdin) │   │ (envelope)│   │ (HTTP POST)│   │   Mapper   │   │ (stdout)│
//! └─────────┘   └───────────┘   └────────────┘   └────────────┘   └─────────┘
//! ```
//!
//! Every failure mode (malformed input, transport failure, service-side
//! rejection, deadline expiry, unexpected fault) is normalized into a
//! [`SolverError`] with a stable code and a retriability flag. The caller
//! always receives a single JSON document and a zero exit status; it must
//! inspect the `ok` field to distinguish success from failure.
//!
//! The bridge never retries. It reports whether a failure is retriable and
//! leaves the retry decision to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod bridge;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;

pub use bridge::{Bridge, BridgeReply};
pub use client::SolverClient;
pub use config::BridgeConfig;
pub use envelope::{Envelope, SolverCall};
pub use error::{Error, ErrorCode, Result, SolverError};

/// Provider tag stamped on every normalized error
pub const PROVIDER: &str = "openspiel";

/// Default solving service endpoint
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8787/solve";

/// Solve deadline in milliseconds when the envelope omits `timeoutMs`
pub const DEFAULT_TIMEOUT_MS: f64 = 1000.0;

/// Minimum effective deadline in seconds
pub const MIN_TIMEOUT_SECONDS: f64 = 0.001;

/// Ceiling on the deadline so it always converts to a valid `Duration`
pub const MAX_TIMEOUT_SECONDS: f64 = 86_400.0;
