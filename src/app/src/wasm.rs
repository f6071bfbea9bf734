//! WebAssembly FFI bindings for the browser shell.
//!
//! The page script forwards `DOMContentLoaded`, the two click listeners and
//! the request timer through `process_event`, performs the returned HTTP
//! effects with `fetch()` and writes `view()` into the elements named by the
//! view model.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{
    bridge::{Bridge, EffectId},
    Core,
};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Log a failed bridge call; the shell gets no effects for it
fn bridge_output<E: std::fmt::Debug>(call: &str, result: Result<(), E>, out: Vec<u8>) -> Vec<u8> {
    match result {
        Ok(()) => out,
        Err(e) => {
            log::error!("{call} failed: {e:?}");
            Vec::new()
        }
    }
}

/// Runs when the module is instantiated
#[wasm_bindgen(start)]
pub fn init_wasm() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger already initialized");
    }
}

/// Takes a bincode-serialized Event and returns bincode-serialized Effects.
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    let result = CORE.update(event_bytes, &mut effects);
    bridge_output("process_event", result, effects)
}

/// Returns the bincode-serialized ViewModel.
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    let result = CORE.view(&mut view);
    bridge_output("view", result, view)
}

/// Resolve an HTTP effect with the shell's `fetch()` outcome.
///
/// A rejected fetch is sent back as an HTTP error so the core can release the
/// processing lock of the toggle that issued it.
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    let result = CORE.resolve(EffectId(id), response_bytes, &mut effects);
    bridge_output("handle_response", result, effects)
}
