use serde::{Deserialize, Serialize};

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::model::{Model, RequestId};
use crate::types::{Toggle, ToggleControl, ERROR_MSG_ID, LOZENGE_CLASS};

/// Everything the shell writes into one toggle's elements
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleView {
    pub container_id: String,
    pub status_id: String,
    pub description_id: String,
    /// Full `class` attribute of the container
    pub class_name: String,
    pub disabled: bool,
    pub status_text: String,
    pub description_text: String,
}

impl ToggleView {
    fn project(toggle: Toggle, control: &ToggleControl) -> Self {
        let binding = toggle.binding();
        let class_name = std::iter::once(LOZENGE_CLASS)
            .chain(control.classes().iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            container_id: binding.container_id.to_string(),
            status_id: binding.status_id.to_string(),
            description_id: binding.description_id.to_string(),
            class_name,
            disabled: !control.is_enabled(),
            status_text: control.status_text().to_string(),
            description_text: control.description_text().to_string(),
        }
    }
}

/// Projection of the model rendered by the shell
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub mqtt: ToggleView,
    pub discovery: ToggleView,
    pub error_msg_id: String,
    /// Written as markup: entries are separated by `<br>`
    pub error_markup: String,
    /// A toggle request is outstanding; the shell arms its timeout timer
    pub request_pending: bool,
    /// Id the shell sends back in `ToggleEvent::RequestTimeout`
    pub pending_request_id: Option<RequestId>,
    pub request_timeout_secs: u32,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        Self {
            mqtt: ToggleView::project(Toggle::Mqtt, &model.mqtt),
            discovery: ToggleView::project(Toggle::Discovery, &model.discovery),
            error_msg_id: ERROR_MSG_ID.to_string(),
            error_markup: model.error_markup.clone(),
            request_pending: model.pending.is_some(),
            pending_request_id: model.pending.as_ref().map(|p| p.id),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}
