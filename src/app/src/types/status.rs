//! Status tags and the classifier that reduces a control to one of them.

use serde::{Deserialize, Serialize};

use super::error::InvalidStateError;
use super::toggle::{Toggle, ToggleControl};

/// A closed set of mutually exclusive status classes for one control
pub trait StatusTag: Copy + Eq + std::fmt::Debug + 'static {
    /// Every tag, in declaration order
    const ALL: &'static [Self];
    /// Status assumed when the control carries no tag at all
    const DEFAULT: Self;
    /// Control the tags belong to
    const TOGGLE: Toggle;

    fn class_name(self) -> &'static str;
}

/// Status of the MQTT connection toggle
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MqttStatus {
    #[default]
    Disconnected,
    Processing,
    Connected,
}

impl StatusTag for MqttStatus {
    const ALL: &'static [Self] = &[Self::Disconnected, Self::Processing, Self::Connected];
    const DEFAULT: Self = Self::Disconnected;
    const TOGGLE: Toggle = Toggle::Mqtt;

    fn class_name(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Processing => "processing",
            Self::Connected => "connected",
        }
    }
}

/// Status of the Home Assistant discovery toggle
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscoveryStatus {
    #[default]
    Undiscovered,
    Processing,
    Discovered,
}

impl StatusTag for DiscoveryStatus {
    const ALL: &'static [Self] = &[Self::Undiscovered, Self::Processing, Self::Discovered];
    const DEFAULT: Self = Self::Undiscovered;
    const TOGGLE: Toggle = Toggle::Discovery;

    fn class_name(self) -> &'static str {
        match self {
            Self::Undiscovered => "undiscovered",
            Self::Processing => "processing",
            Self::Discovered => "discovered",
        }
    }
}

/// Reduce a control to exactly one status of `S`.
///
/// No tag yields `S::DEFAULT`; more than one tag is a markup defect and is
/// reported instead of being resolved.
pub fn classify<S: StatusTag>(control: &ToggleControl) -> Result<S, InvalidStateError> {
    let present: Vec<S> = S::ALL
        .iter()
        .copied()
        .filter(|tag| control.has_class(tag.class_name()))
        .collect();

    match present.as_slice() {
        [] => Ok(S::DEFAULT),
        [single] => Ok(*single),
        many => {
            let tags = many.iter().map(|tag| tag.class_name().to_string()).collect();
            let err = InvalidStateError {
                toggle: S::TOGGLE,
                tags,
            };
            log::error!("{err}");
            Err(err)
        }
    }
}

/// Remove every tag of `S` and add `status`, leaving exactly one tag behind
pub fn set_status<S: StatusTag>(control: &mut ToggleControl, status: S) {
    for tag in S::ALL {
        control.remove_class(tag.class_name());
    }
    control.add_class(status.class_name());
}
