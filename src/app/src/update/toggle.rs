use crux_core::{render::render, Command};

use crate::config::{DISCOVERY_TOGGLE_ENDPOINT, MQTT_TOGGLE_ENDPOINT, REQUEST_TIMEOUT_SECS};
use crate::events::{Event, SyncResult, ToggleEvent};
use crate::http_helpers::{describe_sync_error, format_error, handle_request_error};
use crate::model::{Model, ModelErrorHandler, PendingRequest, RequestId};
use crate::types::{
    DiscoveryStatus, InvalidStateError, MqttStatus, Scene, Toggle, TransportError,
};
use crate::Effect;

use super::sync::{handle_post_response, post_url};

pub const MQTT_WAIT_MESSAGE: &str = "Wait until Connection/Disconnection stops processing";
pub const DISCOVERY_WAIT_MESSAGE: &str = "Wait until Discovery/Undiscovery complete";
pub const CONNECT_FIRST_MESSAGE: &str = "MQTT must be connected first";

const MQTT_ERROR_CONTEXT: &str = "Error Toggling MQTT";
const DISCOVERY_ERROR_CONTEXT: &str = "Error toggling Discovery";

/// Maps the answer to one toggle request to the event that carries it back
type ToggleResponseEvent = fn(RequestId, SyncResult) -> Event;

fn error_context(toggle: Toggle) -> &'static str {
    match toggle {
        Toggle::Mqtt => MQTT_ERROR_CONTEXT,
        Toggle::Discovery => DISCOVERY_ERROR_CONTEXT,
    }
}

/// Handle toggle responses and timeouts. Clicks are dispatched through
/// `InitConfig`.
pub fn handle(event: ToggleEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ToggleEvent::MqttToggleResponse(id, result) => {
            handle_mqtt_toggle_response(id, result, model)
        }
        ToggleEvent::DiscoveryToggleResponse(id, result) => {
            handle_discovery_toggle_response(id, result, model)
        }
        ToggleEvent::RequestTimeout(id) => handle_request_timeout(id, model),
        ToggleEvent::MqttClicked | ToggleEvent::DiscoveryClicked => {
            unreachable!("Clicks are routed through InitConfig")
        }
    }
}

fn invalid_state(model: &mut Model, error: InvalidStateError) -> Command<Effect, Event> {
    model.set_error(error.to_string());
    render()
}

/// Enter the processing scene and send the snapshot to `path`
fn start_toggle_request(
    model: &mut Model,
    toggle: Toggle,
    processing: Scene,
    path: &str,
    action: &'static str,
    on_response: ToggleResponseEvent,
) -> Command<Effect, Event> {
    let snapshot = model.get_state(vec![]);
    model.apply_scene(processing);

    let id = model.next_request_id();
    match post_url(path, action, &snapshot, move |result| on_response(id, result)) {
        Ok(request) => {
            model.pending = Some(PendingRequest {
                id,
                toggle,
                snapshot,
            });
            Command::all([render(), request])
        }
        Err(e) => {
            model.resync_state(&snapshot);
            handle_request_error(model, action, e)
        }
    }
}

/// How a toggle response relates to the processing lock
enum Claim {
    /// Answer to the outstanding request, which is released
    Current(PendingRequest),
    /// Nothing is outstanding, e.g. the request already timed out
    Late,
    /// A newer request holds the lock
    Superseded,
}

fn claim_pending(model: &mut Model, id: RequestId) -> Claim {
    match model.pending.take() {
        None => Claim::Late,
        Some(pending) if pending.id == id => Claim::Current(pending),
        Some(pending) => {
            log::debug!(
                "dropping response to request {id}, {:?} request {} is in flight",
                pending.toggle,
                pending.id
            );
            model.pending = Some(pending);
            Claim::Superseded
        }
    }
}

/// Show a failed round trip and leave the processing scene
fn release_after_failure(model: &mut Model, pending: Option<PendingRequest>, message: String) {
    if let Some(PendingRequest { snapshot, .. }) = pending {
        model.resync_state(&snapshot);
    }
    model.set_error(message);
}

pub fn mqtt_toggle_click(model: &mut Model) -> Command<Effect, Event> {
    let status = match model.mqtt_status().and_then(|s| model.discovery_status().map(|_| s)) {
        Ok(status) => status,
        Err(e) => return invalid_state(model, e),
    };

    if status == MqttStatus::Processing {
        model.mqtt.set_description_text(MQTT_WAIT_MESSAGE);
        return render();
    }
    if !model.mqtt.is_enabled() {
        log::debug!("ignoring click on disabled {:?} toggle", Toggle::Mqtt);
        return Command::done();
    }

    let processing = Scene::mqtt_processing(model.is_mqtt_connected());
    start_toggle_request(
        model,
        Toggle::Mqtt,
        processing,
        MQTT_TOGGLE_ENDPOINT,
        "Toggle MQTT",
        |id, result| Event::Toggle(ToggleEvent::MqttToggleResponse(id, result)),
    )
}

pub fn discovery_toggle_click(model: &mut Model) -> Command<Effect, Event> {
    let status = match model.mqtt_status().and_then(|_| model.discovery_status()) {
        Ok(status) => status,
        Err(e) => return invalid_state(model, e),
    };

    if !model.is_mqtt_connected() {
        model.discovery.set_description_text(CONNECT_FIRST_MESSAGE);
        return render();
    }
    if status == DiscoveryStatus::Processing {
        model.discovery.set_description_text(DISCOVERY_WAIT_MESSAGE);
        return render();
    }
    if !model.discovery.is_enabled() {
        log::debug!("ignoring click on disabled {:?} toggle", Toggle::Discovery);
        return Command::done();
    }

    let processing = Scene::discovery_processing(model.is_discovery_discovered());
    start_toggle_request(
        model,
        Toggle::Discovery,
        processing,
        DISCOVERY_TOGGLE_ENDPOINT,
        "Toggle Discovery",
        |id, result| Event::Toggle(ToggleEvent::DiscoveryToggleResponse(id, result)),
    )
}

fn handle_mqtt_toggle_response(
    id: RequestId,
    result: SyncResult,
    model: &mut Model,
) -> Command<Effect, Event> {
    let pending = match claim_pending(model, id) {
        Claim::Current(pending) => Some(pending),
        Claim::Late => None,
        Claim::Superseded => return Command::done(),
    };

    match handle_post_response(model, result) {
        Ok(state) => model.apply_scene(if state.connected {
            Scene::Connected
        } else {
            Scene::Disconnected
        }),
        Err(e) => release_after_failure(model, pending, describe_sync_error(MQTT_ERROR_CONTEXT, &e)),
    }
    render()
}

fn handle_discovery_toggle_response(
    id: RequestId,
    result: SyncResult,
    model: &mut Model,
) -> Command<Effect, Event> {
    let pending = match claim_pending(model, id) {
        Claim::Current(pending) => Some(pending),
        Claim::Late => None,
        Claim::Superseded => return Command::done(),
    };

    match handle_post_response(model, result) {
        // Lost the connection underneath discovery: show the server's view
        Ok(state) if !state.connected => model.resync_state(&state),
        Ok(state) => model.apply_scene(if state.discovered {
            Scene::Discovered
        } else {
            Scene::Undiscovered
        }),
        Err(e) => release_after_failure(
            model,
            pending,
            describe_sync_error(DISCOVERY_ERROR_CONTEXT, &e),
        ),
    }
    render()
}

/// The shell gave up waiting on request `id`; a late response is still
/// applied when it arrives
fn handle_request_timeout(id: RequestId, model: &mut Model) -> Command<Effect, Event> {
    let pending = match model.pending.take() {
        Some(pending) if pending.id == id => pending,
        other => {
            model.pending = other;
            log::debug!("ignoring stale timeout of request {id}");
            return Command::done();
        }
    };

    let error = TransportError::new(
        "TimeoutError",
        format!("No response within {REQUEST_TIMEOUT_SECS} seconds"),
    );
    let message = format_error(error_context(pending.toggle), &error);
    release_after_failure(model, Some(pending), message);
    render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_ERROR;
    use crate::types::{ClientState, SyncError};

    fn network_error() -> SyncError {
        SyncError::Transport(TransportError::new("Error", "Network error simulated"))
    }

    fn respond_mqtt(model: &mut Model, result: SyncResult) {
        let id = model.last_request_id;
        let _ = handle(ToggleEvent::MqttToggleResponse(id, result), model);
    }

    fn respond_discovery(model: &mut Model, result: SyncResult) {
        let id = model.last_request_id;
        let _ = handle(ToggleEvent::DiscoveryToggleResponse(id, result), model);
    }

    fn time_out(model: &mut Model) {
        let id = model.last_request_id;
        let _ = handle(ToggleEvent::RequestTimeout(id), model);
    }

    fn connected_model() -> Model {
        let mut model = Model::default();
        model.apply_scene(Scene::Connected);
        model
    }

    mod mqtt_click {
        use super::*;

        #[test]
        fn connect_enters_processing_and_records_snapshot() {
            let mut model = Model::default();

            let _ = mqtt_toggle_click(&mut model);

            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Processing));
            assert_eq!(model.mqtt.status_text(), "Connection in process");
            assert!(!model.mqtt.is_enabled());
            assert!(!model.discovery.is_enabled());
            assert_eq!(
                model.pending,
                Some(PendingRequest {
                    id: 1,
                    toggle: Toggle::Mqtt,
                    snapshot: ClientState::new(false, false),
                })
            );
        }

        #[test]
        fn disconnect_enters_disconnect_processing() {
            let mut model = connected_model();

            let _ = mqtt_toggle_click(&mut model);

            assert_eq!(model.mqtt.status_text(), "Disconnection in process");
            assert_eq!(
                model.pending.as_ref().map(|p| p.snapshot.connected),
                Some(true)
            );
        }

        #[test]
        fn click_while_processing_only_updates_description() {
            let mut model = Model::default();
            model.apply_scene(Scene::ConnectProcessing);
            let before = model.clone();

            let _ = mqtt_toggle_click(&mut model);

            assert_eq!(model.mqtt.description_text(), MQTT_WAIT_MESSAGE);
            assert_eq!(model.mqtt.status_text(), "Connection in process");
            assert_eq!(model.mqtt.classes(), before.mqtt.classes());
            assert_eq!(model.discovery, before.discovery);
            assert_eq!(model.pending, None);
        }

        #[test]
        fn click_while_discovered_is_ignored() {
            let mut model = Model::default();
            model.apply_scene(Scene::Discovered);
            let before = model.clone();

            let _ = mqtt_toggle_click(&mut model);

            assert_eq!(model, before);
        }

        #[test]
        fn click_with_conflicting_tags_reports_invalid_state() {
            let mut model = Model::default();
            model.mqtt.add_class("connected");

            let _ = mqtt_toggle_click(&mut model);

            assert_eq!(
                model.error_markup,
                "Invalid status for toggle: disconnected,connected"
            );
            assert_eq!(model.pending, None);
        }

        #[test]
        fn response_applies_connected_scene() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);

            respond_mqtt(&mut model, Ok(ClientState::new(true, false)));

            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Connected));
            assert!(model.mqtt.is_enabled());
            assert!(model.discovery.is_enabled());
            assert_eq!(
                model.mqtt.description_text(),
                "Start Discovery or Click To Disconnect"
            );
            assert_eq!(model.pending, None);
        }

        #[test]
        fn response_with_errors_shows_them() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);

            respond_mqtt(
                &mut model,
                Ok(ClientState::new(false, false).with_errors(["Connection refused"])),
            );

            assert_eq!(model.error_markup, "Connection refused");
            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Disconnected));
        }

        #[test]
        fn network_failure_is_formatted_and_releases_lock() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);

            respond_mqtt(&mut model, Err(network_error()));

            assert_eq!(
                model.error_markup,
                "Error Toggling MQTT: Error: Network error simulated\n\tname: Error\n\tmessage: Network error simulated"
            );
            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Disconnected));
            assert!(model.mqtt.is_enabled());
            assert_eq!(model.pending, None);
        }
    }

    mod discovery_click {
        use super::*;

        #[test]
        fn click_while_disconnected_needs_connection() {
            let mut model = Model::default();

            let _ = discovery_toggle_click(&mut model);

            assert_eq!(model.discovery.description_text(), CONNECT_FIRST_MESSAGE);
            assert_eq!(model.discovery.status_text(), "Not discovered");
            assert!(!model.discovery.is_enabled());
            assert_eq!(model.pending, None);
        }

        #[test]
        fn click_while_processing_only_updates_description() {
            let mut model = Model::default();
            model.apply_scene(Scene::DiscoveryProcessing);

            let _ = discovery_toggle_click(&mut model);

            assert_eq!(model.discovery.description_text(), DISCOVERY_WAIT_MESSAGE);
            assert_eq!(model.discovery.status_text(), "Discovery in process");
            assert_eq!(model.discovery_status(), Ok(DiscoveryStatus::Processing));
            assert_eq!(model.pending, None);
        }

        #[test]
        fn discover_enters_processing() {
            let mut model = connected_model();

            let _ = discovery_toggle_click(&mut model);

            assert_eq!(model.discovery_status(), Ok(DiscoveryStatus::Processing));
            assert_eq!(model.discovery.status_text(), "Discovery in process");
            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Connected));
            assert!(!model.mqtt.is_enabled());
        }

        #[test]
        fn undiscover_enters_undiscovery_processing() {
            let mut model = Model::default();
            model.apply_scene(Scene::Discovered);

            let _ = discovery_toggle_click(&mut model);

            assert_eq!(model.discovery.status_text(), "Un-Discovery in process");
            assert_eq!(
                model.pending.as_ref().map(|p| p.snapshot.clone()),
                Some(ClientState::new(true, true))
            );
        }

        #[test]
        fn response_applies_discovered_scene() {
            let mut model = connected_model();
            let _ = discovery_toggle_click(&mut model);

            respond_discovery(&mut model, Ok(ClientState::new(true, true)));

            assert_eq!(model.discovery_status(), Ok(DiscoveryStatus::Discovered));
            assert!(model.discovery.is_enabled());
            assert!(!model.mqtt.is_enabled());
            assert_eq!(model.discovery.description_text(), "Click to Undiscover");
        }

        #[test]
        fn response_applies_undiscovered_scene() {
            let mut model = Model::default();
            model.apply_scene(Scene::Discovered);
            let _ = discovery_toggle_click(&mut model);

            respond_discovery(&mut model, Ok(ClientState::new(true, false)));

            assert_eq!(model.discovery_status(), Ok(DiscoveryStatus::Undiscovered));
            assert_eq!(model.discovery.description_text(), "Click to Discover");
            assert!(model.mqtt.is_enabled());
        }

        #[test]
        fn response_reporting_lost_connection_resyncs() {
            let mut model = connected_model();
            let _ = discovery_toggle_click(&mut model);

            respond_discovery(&mut model, Ok(ClientState::new(false, false)));

            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Disconnected));
            assert!(!model.discovery.is_enabled());
        }

        #[test]
        fn network_failure_is_formatted_and_releases_lock() {
            let mut model = connected_model();
            let _ = discovery_toggle_click(&mut model);

            respond_discovery(&mut model, Err(network_error()));

            assert_eq!(
                model.error_markup,
                "Error toggling Discovery: Error: Network error simulated\n\tname: Error\n\tmessage: Network error simulated"
            );
            assert_eq!(model.discovery_status(), Ok(DiscoveryStatus::Undiscovered));
            assert!(model.discovery.is_enabled());
        }
    }

    mod timeout {
        use super::*;

        #[test]
        fn timeout_releases_pending_request() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);

            time_out(&mut model);

            assert_eq!(model.pending, None);
            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Disconnected));
            assert!(model.mqtt.is_enabled());
            assert!(model
                .error_markup
                .starts_with("Error Toggling MQTT: TimeoutError: No response within 30 seconds"));
        }

        #[test]
        fn timeout_without_pending_request_is_ignored() {
            let mut model = connected_model();
            let before = model.clone();

            time_out(&mut model);

            assert_eq!(model, before);
            assert_eq!(model.error_markup, NO_ERROR);
        }

        #[test]
        fn late_response_is_still_applied() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);
            time_out(&mut model);

            respond_mqtt(&mut model, Ok(ClientState::new(true, false)));

            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Connected));
        }

        #[test]
        fn stale_failure_keeps_newer_request_locked() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);
            time_out(&mut model);
            let _ = mqtt_toggle_click(&mut model);
            let before = model.clone();

            let _ = handle(
                ToggleEvent::MqttToggleResponse(1, Err(network_error())),
                &mut model,
            );

            assert_eq!(model, before);
            assert_eq!(model.mqtt_status(), Ok(MqttStatus::Processing));
            assert_eq!(model.pending.as_ref().map(|p| p.id), Some(2));
        }

        #[test]
        fn stale_timeout_keeps_newer_request_locked() {
            let mut model = Model::default();
            let _ = mqtt_toggle_click(&mut model);
            respond_mqtt(&mut model, Ok(ClientState::new(true, false)));
            let _ = mqtt_toggle_click(&mut model);

            let _ = handle(ToggleEvent::RequestTimeout(1), &mut model);

            assert_eq!(model.mqtt.status_text(), "Disconnection in process");
            assert_eq!(model.pending.as_ref().map(|p| p.id), Some(2));
            assert_eq!(model.error_markup, NO_ERROR);
        }
    }
}
