//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Rishta client
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RishtaError {
    /// Transport-level failure: the request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with 401/403
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The backend answered with another 4xx status
    #[error("API error: {0}")]
    Api(String),

    /// The backend answered with a 5xx status
    #[error("Server error: {0}")]
    Server(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Rishta operations
pub type Result<T> = std::result::Result<T, RishtaError>;

/// Outcome of an endpoint action.
///
/// The backend signals failure two different ways: an answered exchange
/// whose envelope carries `success: false`, and a call that never got an
/// answer at all. Callers branch on the two variants instead of
/// re-deriving success from envelope fields.
#[derive(Error, Debug, Clone)]
pub enum ActionError {
    /// The server answered but rejected the operation; carries the
    /// user-facing message (server-provided or the action's fallback).
    #[error("{0}")]
    Rejected(String),

    /// The call failed before a usable answer arrived.
    #[error(transparent)]
    Failed(#[from] RishtaError),
}

impl ActionError {
    /// `true` when the failure was an answered rejection rather than a
    /// transport problem.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
