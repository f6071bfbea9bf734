pub mod config;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod types;
pub mod update;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;


use crux_core::Command;

// Re-export core types
pub use crate::{
    config::InitConfig,
    events::{Event, StatusEvent, SyncResult, ToggleEvent, UiEvent},
    http_helpers::{
        build_url, describe_sync_error, format_error, handle_request_error, map_http_error,
        parse_state_response, process_state_response, BASE_URL,
    },
    model::Model,
    types::*,
    view::{ToggleView, ViewModel},
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
}

pub type HttpCmd = crux_http::command::Http<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App {
    config: InitConfig,
}

impl App {
    /// Core with substituted lifecycle steps
    pub fn with_config(config: InitConfig) -> Self {
        Self { config }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model, &self.config)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel::from(model)
    }
}
