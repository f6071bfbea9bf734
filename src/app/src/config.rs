//! Endpoints, timeouts and the overridable startup steps.

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::update::{status, toggle};
use crate::Effect;

pub const STATUS_ENDPOINT: &str = "/status";
pub const MQTT_TOGGLE_ENDPOINT: &str = "/mqtt-toggle";
pub const DISCOVERY_TOGGLE_ENDPOINT: &str = "/discovery-toggle";

/// Seconds the shell waits for a toggle response before sending
/// `ToggleEvent::RequestTimeout` with the pending request id
pub const REQUEST_TIMEOUT_SECS: u32 = 30;

/// One step of the page lifecycle
pub type Handler = fn(&mut Model) -> Command<Effect, Event>;

/// The four steps wired up when the page becomes ready.
///
/// `Default` wires the real handlers; tests substitute their own.
#[derive(Clone, Copy)]
pub struct InitConfig {
    /// Initial sync of both controls with the service
    pub dom_init: Handler,
    /// Status update run on load and on `StatusEvent::Refresh`
    pub on_update: Handler,
    pub on_mqtt_click: Handler,
    pub on_discovery_click: Handler,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            dom_init: status::init_dom,
            on_update: status::update_buttons_from_status,
            on_mqtt_click: toggle::mqtt_toggle_click,
            on_discovery_click: toggle::discovery_toggle_click,
        }
    }
}

impl std::fmt::Debug for InitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitConfig").finish_non_exhaustive()
    }
}
