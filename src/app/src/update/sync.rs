//! Request/response protocol with the MQTT service.

use crux_core::Command;

use crate::config::STATUS_ENDPOINT;
use crate::events::{Event, SyncResult};
use crate::http_helpers::{build_url, describe_sync_error, process_state_response};
use crate::model::{Model, ModelErrorHandler};
use crate::types::ClientState;
use crate::{Effect, HttpCmd};

const STATUS_ERROR_CONTEXT: &str = "Error fetching status";

/// Maps a parsed round trip to the event that carries it back into the core
pub type ResponseEvent = fn(SyncResult) -> Event;

/// `GET /status`
pub fn fetch_status(on_response: ResponseEvent) -> Command<Effect, Event> {
    log::debug!("GET {STATUS_ENDPOINT}");
    HttpCmd::get(build_url(STATUS_ENDPOINT))
        .build()
        .then_send(move |result| on_response(process_state_response("Fetch status", result)))
}

/// Apply the lockout rules of a fetched status, or show why fetching failed
pub fn handle_fetched_status(model: &mut Model, result: SyncResult) -> Option<ClientState> {
    match result {
        Ok(state) => {
            log::debug!("fetched status: {state:?}");
            model.check_state_error(&state);
            Some(state)
        }
        Err(e) => {
            model.set_error(describe_sync_error(STATUS_ERROR_CONTEXT, &e));
            None
        }
    }
}

/// `POST path` with `state` as JSON body.
///
/// Fails only if the body cannot be serialized.
pub fn post_url<F>(
    path: &str,
    action: &'static str,
    state: &ClientState,
    on_response: F,
) -> crux_http::Result<Command<Effect, Event>>
where
    F: FnOnce(SyncResult) -> Event + Send + 'static,
{
    log::debug!("POST {path}: {state:?}");
    let builder = HttpCmd::post(build_url(path))
        .header("Content-Type", "application/json")
        .body_json(state)?;

    Ok(builder
        .build()
        .then_send(move |result| on_response(process_state_response(action, result))))
}

/// Show errors the service reported and resync to its view.
///
/// The parsed response is handed back unchanged.
pub fn handle_post_response(model: &mut Model, result: SyncResult) -> SyncResult {
    if let Ok(state) = &result {
        if state.has_errors() {
            model.set_error_message(&state.errors);
            model.resync_state(state);
        }
    }
    result
}
