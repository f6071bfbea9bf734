use crux_core::{render::render, Command};

use crate::events::{Event, UiEvent};
use crate::model::{Model, NO_ERROR};
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (page hydration, clearing the error element)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::PageLoaded(markup) => {
            model.mqtt = markup.mqtt.into();
            model.discovery = markup.discovery.into();
            render()
        }
        UiEvent::ClearError => update_field!(model.error_markup, NO_ERROR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn page_markup() -> PageMarkup {
        PageMarkup {
            mqtt: ControlMarkup {
                class_name: "lozenge connected".to_string(),
                status_text: "Connected".to_string(),
                description_text: "Start Discovery or Click To Disconnect".to_string(),
            },
            discovery: ControlMarkup {
                class_name: "lozenge undiscovered".to_string(),
                status_text: "Not discovered".to_string(),
                description_text: "Click to start Discovery".to_string(),
            },
        }
    }

    #[test]
    fn page_markup_replaces_controls() {
        let mut model = Model::default();

        let _ = handle(UiEvent::PageLoaded(page_markup()), &mut model);

        assert_eq!(model.mqtt_status(), Ok(MqttStatus::Connected));
        assert!(model.discovery.is_enabled());
        assert_eq!(model.mqtt.status_text(), "Connected");
    }

    #[test]
    fn conflicting_markup_is_kept_for_the_classifier() {
        let mut markup = page_markup();
        markup.mqtt.class_name = "lozenge disconnected connected".to_string();
        let mut model = Model::default();

        let _ = handle(UiEvent::PageLoaded(markup), &mut model);

        assert!(model.mqtt_status().is_err());
    }

    #[test]
    fn clear_error_restores_placeholder() {
        let mut model = Model {
            error_markup: "Some error".to_string(),
            ..Default::default()
        };

        let _ = handle(UiEvent::ClearError, &mut model);

        assert_eq!(model.error_markup, NO_ERROR);
    }
}
