pub mod status;
pub mod sync;
pub mod toggle;
mod ui;

use crux_core::Command;

use crate::config::InitConfig;
use crate::events::{Event, StatusEvent, ToggleEvent};
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model, config: &InitConfig) -> Command<Effect, Event> {
    match event {
        Event::Initialize => init(config, model),

        // Steps that tests may substitute
        Event::Status(StatusEvent::Refresh) => (config.on_update)(model),
        Event::Toggle(ToggleEvent::MqttClicked) => (config.on_mqtt_click)(model),
        Event::Toggle(ToggleEvent::DiscoveryClicked) => (config.on_discovery_click)(model),

        Event::Status(event) => status::handle(event, model),
        Event::Toggle(event) => toggle::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}

/// Page-ready: initial sync first, then the on-load status update
pub fn init(config: &InitConfig, model: &mut Model) -> Command<Effect, Event> {
    log::debug!("initialize");
    let dom_init = (config.dom_init)(model);
    let on_update = (config.on_update)(model);
    Command::all([dom_init, on_update])
}
