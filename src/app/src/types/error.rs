use thiserror::Error;

use super::toggle::Toggle;

/// More than one status tag on a single control.
///
/// This is a markup or programming defect, never a runtime condition to
/// paper over.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid status for toggle: {}", tags.join(","))]
pub struct InvalidStateError {
    pub toggle: Toggle,
    pub tags: Vec<String>,
}

/// A request that never produced an HTTP response (rejected fetch, timeout)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct TransportError {
    pub name: String,
    pub message: String,
}

impl TransportError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Failures at the boundary to the remote service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{action} failed: HTTP {status} ({body})")]
    Status {
        action: String,
        status: String,
        body: String,
    },
    #[error("{action}: malformed state payload: {reason}")]
    Payload { action: String, reason: String },
}

/// Server reported `Discovered` while not `Connected`
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Server reports Discovered while MQTT is not Connected")]
pub struct InconsistentState;
