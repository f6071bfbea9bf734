//! Atomic visual states of both toggles.
//!
//! A scene fixes status tag, enabled flag and both labels of the MQTT and the
//! Discovery control at once. Scenes are the only way visible state changes,
//! so a combination such as "Connected" text on a disconnected tag can never
//! be shown.

use serde::{Deserialize, Serialize};

use super::error::InconsistentState;
use super::state::ClientState;
use super::status::{DiscoveryStatus, MqttStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Scene {
    Disconnected,
    ConnectProcessing,
    Connected,
    DisconnectProcessing,
    Discovered,
    Undiscovered,
    DiscoveryProcessing,
    UndiscoveryProcessing,
}

/// Everything a scene writes into one control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBundle<S> {
    pub tag: S,
    pub enabled: bool,
    pub status_text: &'static str,
    pub description_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneBundle {
    pub mqtt: ControlBundle<MqttStatus>,
    pub discovery: ControlBundle<DiscoveryStatus>,
}

const MUST_CONNECT_FIRST: &str = "You must Connect before Discovery";
const WAIT_FOR_COMPLETION: &str = "Wait for completion";
const MUST_UNDISCOVER_FIRST: &str = "You must Undiscover before Connect";
const START_DISCOVERY_OR_DISCONNECT: &str = "Start Discovery or Click To Disconnect";

const NOT_DISCOVERED_LOCKED: ControlBundle<DiscoveryStatus> = ControlBundle {
    tag: DiscoveryStatus::Undiscovered,
    enabled: false,
    status_text: "Not discovered",
    description_text: MUST_CONNECT_FIRST,
};

const MQTT_HELD_BY_DISCOVERY: ControlBundle<MqttStatus> = ControlBundle {
    tag: MqttStatus::Connected,
    enabled: false,
    status_text: "Connected",
    description_text: MUST_UNDISCOVER_FIRST,
};

const MQTT_CONNECTED: ControlBundle<MqttStatus> = ControlBundle {
    tag: MqttStatus::Connected,
    enabled: true,
    status_text: "Connected",
    description_text: START_DISCOVERY_OR_DISCONNECT,
};

impl Scene {
    pub fn bundle(self) -> SceneBundle {
        match self {
            Scene::Disconnected => SceneBundle {
                mqtt: ControlBundle {
                    tag: MqttStatus::Disconnected,
                    enabled: true,
                    status_text: "Not Connected",
                    description_text: "Click to Connect",
                },
                discovery: NOT_DISCOVERED_LOCKED,
            },
            Scene::ConnectProcessing => SceneBundle {
                mqtt: ControlBundle {
                    tag: MqttStatus::Processing,
                    enabled: false,
                    status_text: "Connection in process",
                    description_text: WAIT_FOR_COMPLETION,
                },
                discovery: NOT_DISCOVERED_LOCKED,
            },
            Scene::Connected => SceneBundle {
                mqtt: MQTT_CONNECTED,
                discovery: ControlBundle {
                    tag: DiscoveryStatus::Undiscovered,
                    enabled: true,
                    status_text: "Not discovered",
                    description_text: "Click to start Discovery",
                },
            },
            Scene::DisconnectProcessing => SceneBundle {
                mqtt: ControlBundle {
                    tag: MqttStatus::Processing,
                    enabled: false,
                    status_text: "Disconnection in process",
                    description_text: WAIT_FOR_COMPLETION,
                },
                discovery: NOT_DISCOVERED_LOCKED,
            },
            Scene::Discovered => SceneBundle {
                mqtt: MQTT_HELD_BY_DISCOVERY,
                discovery: ControlBundle {
                    tag: DiscoveryStatus::Discovered,
                    enabled: true,
                    status_text: "Discovered",
                    description_text: "Click to Undiscover",
                },
            },
            Scene::Undiscovered => SceneBundle {
                mqtt: MQTT_CONNECTED,
                discovery: ControlBundle {
                    tag: DiscoveryStatus::Undiscovered,
                    enabled: true,
                    status_text: "Not discovered",
                    description_text: "Click to Discover",
                },
            },
            Scene::DiscoveryProcessing => SceneBundle {
                mqtt: MQTT_HELD_BY_DISCOVERY,
                discovery: ControlBundle {
                    tag: DiscoveryStatus::Processing,
                    enabled: false,
                    status_text: "Discovery in process",
                    description_text: WAIT_FOR_COMPLETION,
                },
            },
            Scene::UndiscoveryProcessing => SceneBundle {
                mqtt: MQTT_HELD_BY_DISCOVERY,
                discovery: ControlBundle {
                    tag: DiscoveryStatus::Processing,
                    enabled: false,
                    status_text: "Un-Discovery in process",
                    description_text: WAIT_FOR_COMPLETION,
                },
            },
        }
    }

    /// Collapse the server's two flags into one scene.
    ///
    /// Priority is Discovered > Connected > Disconnected. A state that is
    /// discovered but not connected is rejected; callers show it as
    /// `Disconnected` together with the error.
    pub fn resync(state: &ClientState) -> Result<Scene, InconsistentState> {
        if !state.is_consistent() {
            return Err(InconsistentState);
        }
        Ok(if state.discovered {
            Scene::Discovered
        } else if state.connected {
            Scene::Connected
        } else {
            Scene::Disconnected
        })
    }

    /// Scene shown while a toggle request is in flight
    pub fn mqtt_processing(currently_connected: bool) -> Scene {
        if currently_connected {
            Scene::DisconnectProcessing
        } else {
            Scene::ConnectProcessing
        }
    }

    pub fn discovery_processing(currently_discovered: bool) -> Scene {
        if currently_discovered {
            Scene::UndiscoveryProcessing
        } else {
            Scene::DiscoveryProcessing
        }
    }

    pub fn is_processing(self) -> bool {
        matches!(
            self,
            Scene::ConnectProcessing
                | Scene::DisconnectProcessing
                | Scene::DiscoveryProcessing
                | Scene::UndiscoveryProcessing
        )
    }
}
