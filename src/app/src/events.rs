use serde::{Deserialize, Serialize};

use crate::model::RequestId;
use crate::types::*;

/// Result of one round trip to the MQTT service
pub type SyncResult = Result<ClientState, SyncError>;

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    /// Document is ready: initial sync, then the on-load status update
    Initialize,

    Status(StatusEvent),
    Toggle(ToggleEvent),
    Ui(UiEvent),
}

/// Status fetches against `GET /status`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Re-run the status update, e.g. after an error lockout
    Refresh,

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    InitialStatusResponse(SyncResult),
    #[serde(skip)]
    StatusResponse(SyncResult),
}

/// User input on the toggles and the answers to the resulting requests
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ToggleEvent {
    MqttClicked,
    DiscoveryClicked,

    /// Shell timer armed for `pending_request_id` fired
    RequestTimeout(RequestId),

    #[serde(skip)]
    MqttToggleResponse(RequestId, SyncResult),
    #[serde(skip)]
    DiscoveryToggleResponse(RequestId, SyncResult),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Server-rendered markup of both controls
    PageLoaded(PageMarkup),
    ClearError,
}
