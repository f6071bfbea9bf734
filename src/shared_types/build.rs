use anyhow::Result;
use crux_core::typegen::TypeGen;
use mqtt_toggle_core::{
    events::{StatusEvent, ToggleEvent, UiEvent},
    types::{DiscoveryStatus, MqttStatus, Scene, Toggle},
    App,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Domain event enums, so every variant the shell may send is traced
    gen.register_type::<StatusEvent>()?;
    gen.register_type::<ToggleEvent>()?;
    gen.register_type::<UiEvent>()?;

    gen.register_type::<Toggle>()?;
    gen.register_type::<Scene>()?;
    gen.register_type::<MqttStatus>()?;
    gen.register_type::<DiscoveryStatus>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
