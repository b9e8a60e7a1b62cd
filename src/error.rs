//! Error taxonomy and outcome mapping

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed envelope or parameters; the caller must fix the request
    InvalidRequest,
    /// Service explicitly rejected the node
    UnsupportedNode,
    /// Service down, overloaded, or unreachable
    SolverUnavailable,
    /// Deadline expired before the service answered
    SolverTimeout,
    /// Unanticipated fault inside the bridge
    InternalError,
}

/// Normalized failure payload written to the output channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverError {
    /// Always `false`; the caller branches on this field
    pub ok: bool,
    /// Stable error code
    pub code: ErrorCode,
    /// Short human-readable cause
    pub message: String,
    /// Backend tag, always `"openspiel"`
    pub provider: String,
    /// Node hash extracted from the request, if any
    pub node_hash: Option<String>,
    /// Whether a repeat attempt might succeed
    pub retriable: bool,
}

/// Bridge pipeline errors
///
/// One variant per failure class, so the outcome mapping below is an
/// exhaustive `match` rather than a blanket catch-all.
#[derive(Error, Debug)]
pub enum Error {
    /// Input stream was not a decodable envelope
    #[error("invalid stdin payload: {0}")]
    Decode(String),

    /// `request` was missing or not a JSON object
    #[error("missing request object")]
    MissingRequest,

    /// `timeoutMs` was present but not a JSON number
    #[error("timeoutMs must be numeric")]
    NonNumericTimeout,

    /// Service answered with an HTTP error status
    #[error("http {status}: {reason}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// Transport-level failure before any HTTP status was received
    #[error("connection failed: {0}")]
    Transport(String),

    /// Deadline expired
    #[error("request timed out")]
    Timeout,

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Anything unanticipated
    #[error("bridge failure: {0}")]
    Internal(String),
}

impl Error {
    /// Stable code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Decode(_) | Error::MissingRequest | Error::NonNumericTimeout => {
                ErrorCode::InvalidRequest
            }
            Error::Http { status, .. } => match status {
                400 => ErrorCode::InvalidRequest,
                404 => ErrorCode::UnsupportedNode,
                _ => ErrorCode::SolverUnavailable,
            },
            Error::Transport(_) => ErrorCode::SolverUnavailable,
            Error::Timeout => ErrorCode::SolverTimeout,
            Error::Config(_) | Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether a repeat attempt might succeed
    pub fn retriable(&self) -> bool {
        match self {
            Error::Http { status, .. } => *status >= 500,
            Error::Transport(_) | Error::Timeout => true,
            Error::Decode(_)
            | Error::MissingRequest
            | Error::NonNumericTimeout
            | Error::Config(_)
            | Error::Internal(_) => false,
        }
    }

    /// Convert into the normalized failure payload
    pub fn into_solver_error(self, node_hash: Option<String>) -> SolverError {
        SolverError {
            ok: false,
            code: self.code(),
            message: self.to_string(),
            provider: crate::PROVIDER.to_string(),
            node_hash,
            retriable: self.retriable(),
        }
    }
}
