use crux_core::{render::render, Command};

use crate::events::{Event, StatusEvent};
use crate::model::Model;
use crate::Effect;

use super::sync::{fetch_status, handle_fetched_status};

/// Handle status events (initial sync and status updates)
pub fn handle(event: StatusEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        StatusEvent::InitialStatusResponse(result) => {
            if let Some(state) = handle_fetched_status(model, result) {
                if state.has_errors() {
                    model.set_error_message(&state.errors);
                } else {
                    model.clear_error();
                }
                model.resync_unless_pending(&state);
            }
            render()
        }

        StatusEvent::StatusResponse(result) => {
            if let Some(state) = handle_fetched_status(model, result) {
                if state.has_errors() {
                    model.set_error_message(&state.errors);
                    model.resync_unless_pending(&state);
                } else {
                    model.clear_error();
                }
            }
            render()
        }

        StatusEvent::Refresh => unreachable!("Refresh is routed through InitConfig::on_update"),
    }
}

/// Initial sync: fetch the status and show the matching scene
pub fn init_dom(_model: &mut Model) -> Command<Effect, Event> {
    fetch_status(|result| Event::Status(StatusEvent::InitialStatusResponse(result)))
}

/// Fetch the status; on reported errors show them and resync, otherwise
/// clear the error element
pub fn update_buttons_from_status(_model: &mut Model) -> Command<Effect, Event> {
    fetch_status(|result| Event::Status(StatusEvent::StatusResponse(result)))
}
