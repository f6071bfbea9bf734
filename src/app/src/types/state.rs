use serde::{Deserialize, Serialize};

/// State exchanged with the MQTT service on `/status`, `/mqtt-toggle` and
/// `/discovery-toggle`.
///
/// All three fields are required when deserializing; a payload missing one of
/// them is rejected rather than defaulted. Extra fields such as the service's
/// `rc` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientState {
    #[serde(rename = "Connected")]
    pub connected: bool,
    #[serde(rename = "Discovered")]
    pub discovered: bool,
    #[serde(rename = "Error")]
    pub errors: Vec<String>,
}

impl ClientState {
    pub fn new(connected: bool, discovered: bool) -> Self {
        Self {
            connected,
            discovered,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.errors = errors.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Discovery is only valid on top of an MQTT connection
    pub fn is_consistent(&self) -> bool {
        !self.discovered || self.connected
    }
}
