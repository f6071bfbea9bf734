//! HTTP helper functions for Crux Core
//!
//! Response handling for the three MQTT service endpoints, kept out of the
//! macros so it stays debuggable and testable.

use crux_http::{HttpError, Response};

use crate::types::{ClientState, SyncError, TransportError};

/// Base URL for the MQTT service endpoints.
///
/// NOTE: This is a dummy prefix required because `crux_http` requires
/// absolute URLs and rejects relative paths (`RelativeUrlWithoutBase` error).
/// The UI shell strips this prefix before sending requests via `fetch()`,
/// so requests stay relative to the page origin.
pub const BASE_URL: &str = "https://relative";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use mqtt_toggle_core::http_helpers::build_url;
/// let url = build_url("/status");
/// assert_eq!(url, "https://relative/status");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Turn an unsuccessful answer into a status error, keeping the body the
/// service sent.
pub fn extract_error_message(action: &str, status: String, body: Option<Vec<u8>>) -> SyncError {
    let body = match body {
        Some(body) if body.is_empty() => "Empty body".to_string(),
        Some(body) => String::from_utf8(body).unwrap_or_else(|e| format!("Invalid UTF-8: {e}")),
        None => "No body".to_string(),
    };
    SyncError::Status {
        action: action.to_string(),
        status,
        body,
    }
}

/// Parse a state payload from the response body.
///
/// `crux_http` already turns 4xx/5xx into `HttpError::Http`; anything else
/// that is not 2xx (e.g. an unfollowed redirect) is reported here.
pub fn parse_state_response(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<ClientState, SyncError> {
    let status = response.status();
    if !status.is_success() {
        return Err(extract_error_message(
            action,
            status.to_string(),
            response.take_body(),
        ));
    }

    match response.take_body() {
        Some(body) => parse_state(action, &body),
        None => Err(SyncError::Payload {
            action: action.to_string(),
            reason: "Empty response body".to_string(),
        }),
    }
}

pub fn parse_state(action: &str, body: &[u8]) -> Result<ClientState, SyncError> {
    serde_json::from_slice(body).map_err(|e| SyncError::Payload {
        action: action.to_string(),
        reason: e.to_string(),
    })
}

/// Map a failed request to a sync error.
///
/// 4xx/5xx answers keep their status and body. Requests that produced no
/// response are named like a browser names a rejected `fetch()`.
pub fn map_http_error(action: &str, error: HttpError) -> SyncError {
    let (name, message) = match error {
        HttpError::Http { code, body, .. } => {
            return extract_error_message(action, code.to_string(), body);
        }
        HttpError::Io(message) => ("Error", message),
        HttpError::Timeout => ("TimeoutError", "The request timed out".to_string()),
        HttpError::Url(message) => ("UrlError", message),
        HttpError::Json(message) => ("JsonError", message),
    };
    SyncError::Transport(TransportError::new(name, message))
}

/// Process HTTP response result and parse the state payload
pub fn process_state_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<ClientState, SyncError> {
    match result {
        Ok(mut response) => parse_state_response(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Format a transport failure for the error element.
///
/// ```
/// use mqtt_toggle_core::{http_helpers::format_error, TransportError};
/// let err = TransportError::new("Error", "offline");
/// assert_eq!(
///     format_error("Error Toggling MQTT", &err),
///     "Error Toggling MQTT: Error: offline\n\tname: Error\n\tmessage: offline"
/// );
/// ```
pub fn format_error(context: &str, error: &TransportError) -> String {
    format!(
        "{context}: {error}\n\tname: {}\n\tmessage: {}",
        error.name, error.message
    )
}

/// Text shown for any failed round trip
pub fn describe_sync_error(context: &str, error: &SyncError) -> String {
    match error {
        SyncError::Transport(e) => format_error(context, e),
        other => format!("{context}: {other}"),
    }
}

/// Handle request creation error - sets error message and returns render command
///
/// This is used when building an HTTP request fails (e.g., JSON serialization error).
pub fn handle_request_error<M, E>(
    model: &mut M,
    action: &str,
    error: impl std::fmt::Display,
) -> crux_core::Command<crate::Effect, E>
where
    M: crate::model::ModelErrorHandler,
    E: Send + 'static,
{
    model.set_error(format!("Failed to create {action} request: {error}"));
    crux_core::render::render()
}
