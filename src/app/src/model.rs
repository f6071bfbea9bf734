use serde::{Deserialize, Serialize};

use crate::types::*;

/// Content of the error element when there is nothing to report.
///
/// A non-breaking space keeps the element from collapsing in the layout.
pub const NO_ERROR: &str = "\u{a0}";

/// Trait for types that can handle error messages
///
/// This allows HTTP helper functions to work with Model without directly depending on it.
pub trait ModelErrorHandler {
    fn set_error(&mut self, error: String);
}

/// Identifies one toggle request; its response and timeout events carry it
pub type RequestId = u64;

/// A toggle request that has been sent but not answered yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub toggle: Toggle,
    /// State of the controls right before the processing scene was applied
    pub snapshot: ClientState,
}

/// Application Model - the two controls and the error element
///
/// The controls are the single store of visible state: statuses are always
/// re-derived from their class lists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    pub mqtt: ToggleControl,
    pub discovery: ToggleControl,

    /// Markup of the error element (entries joined with `<br>`)
    pub error_markup: String,

    pub pending: Option<PendingRequest>,

    /// Id of the last toggle request sent
    pub last_request_id: RequestId,
}

impl Default for Model {
    fn default() -> Self {
        let mut model = Self {
            mqtt: ToggleControl::default(),
            discovery: ToggleControl::default(),
            error_markup: NO_ERROR.to_string(),
            pending: None,
            last_request_id: 0,
        };
        model.apply_scene(Scene::Disconnected);
        model
    }
}

impl Model {
    /// Apply a scene to both controls at once. Idempotent.
    pub fn apply_scene(&mut self, scene: Scene) {
        log::debug!("apply scene {scene:?}");
        let SceneBundle { mqtt, discovery } = scene.bundle();

        set_status(&mut self.mqtt, mqtt.tag);
        self.mqtt.set_enabled(mqtt.enabled);
        self.mqtt.set_status_text(mqtt.status_text);
        self.mqtt.set_description_text(mqtt.description_text);

        set_status(&mut self.discovery, discovery.tag);
        self.discovery.set_enabled(discovery.enabled);
        self.discovery.set_status_text(discovery.status_text);
        self.discovery.set_description_text(discovery.description_text);
    }

    pub fn mqtt_status(&self) -> Result<MqttStatus, InvalidStateError> {
        classify(&self.mqtt)
    }

    pub fn discovery_status(&self) -> Result<DiscoveryStatus, InvalidStateError> {
        classify(&self.discovery)
    }

    pub fn is_mqtt_connected(&self) -> bool {
        self.mqtt.has_class(MqttStatus::Connected.class_name())
    }

    pub fn is_discovery_discovered(&self) -> bool {
        self.discovery
            .has_class(DiscoveryStatus::Discovered.class_name())
    }

    /// Snapshot the controls into a fresh state value
    pub fn get_state(&self, errors: Vec<String>) -> ClientState {
        ClientState {
            connected: self.is_mqtt_connected(),
            discovered: self.is_discovery_discovered(),
            errors,
        }
    }

    /// Show server-reported errors, one per line
    pub fn set_error_message(&mut self, errors: &[String]) {
        log::warn!("Error->: {}", errors.join(","));
        self.error_markup = errors.join("<br>");
    }

    pub fn clear_error(&mut self) {
        self.error_markup = NO_ERROR.to_string();
    }

    pub fn has_error(&self) -> bool {
        self.error_markup != NO_ERROR
    }

    fn append_error(&mut self, error: &str) {
        if self.has_error() && !self.error_markup.is_empty() {
            self.error_markup = format!("{}<br>{error}", self.error_markup);
        } else {
            self.error_markup = error.to_string();
        }
    }

    /// Disable whatever the reported state does not allow to be clicked
    pub fn check_state_error(&mut self, state: &ClientState) {
        if state.has_errors() || !state.is_consistent() {
            self.mqtt.set_enabled(false);
        }
        if state.has_errors() || !state.connected {
            self.discovery.set_enabled(false);
        }
    }

    pub fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Reconcile with the server's view unless a toggle request holds the
    /// processing lock. Its own response resyncs once it arrives.
    pub fn resync_unless_pending(&mut self, state: &ClientState) {
        match &self.pending {
            Some(pending) => log::debug!(
                "{:?} request {} in flight, keeping its processing scene",
                pending.toggle,
                pending.id
            ),
            None => self.resync_state(state),
        }
    }

    /// Reconcile both controls with the server's view
    pub fn resync_state(&mut self, state: &ClientState) {
        match Scene::resync(state) {
            Ok(scene) => self.apply_scene(scene),
            Err(e) => {
                log::warn!("{e}: {state:?}");
                self.apply_scene(Scene::Disconnected);
                self.append_error(&e.to_string());
            }
        }
    }
}

impl ModelErrorHandler for Model {
    fn set_error(&mut self, error: String) {
        log::error!("{error}");
        self.error_markup = error;
    }
}
