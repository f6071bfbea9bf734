//! Domain types of the toggle synchronization core
//!
//! - toggle: controls and their element bindings
//! - status: status tags and the classifier
//! - scene: atomic visual states of both controls
//! - state: payload exchanged with the MQTT service
//! - error: error kinds

pub mod error;
pub mod scene;
pub mod state;
pub mod status;
pub mod toggle;

pub use error::*;
pub use scene::*;
pub use state::*;
pub use status::*;
pub use toggle::*;
