use serde::{Deserialize, Serialize};

/// Class marking a control that does not accept clicks
pub const DISABLED_CLASS: &str = "disabled";

/// Base class every toggle container carries in the page markup
pub const LOZENGE_CLASS: &str = "lozenge";

/// Element id of the shared error message span
pub const ERROR_MSG_ID: &str = "error-msg";

/// The two interactive switches on the page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Toggle {
    Mqtt,
    Discovery,
}

/// Stable element identifiers of one toggle.
///
/// The shell looks elements up by these ids on every render and never caches
/// the nodes, so the host page may re-render them between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleBinding {
    pub container_id: &'static str,
    pub status_id: &'static str,
    pub description_id: &'static str,
}

impl Toggle {
    pub fn binding(self) -> ToggleBinding {
        match self {
            Toggle::Mqtt => ToggleBinding {
                container_id: "mqtt-toggle",
                status_id: "mqtt-status",
                description_id: "mqtt-description",
            },
            Toggle::Discovery => ToggleBinding {
                container_id: "discovery-toggle",
                status_id: "discovery-status",
                description_id: "discovery-description",
            },
        }
    }
}

/// One physical switch: its class list plus the two labels.
///
/// The class list plays the role of the element's `classList`: status tags and
/// the `disabled` marker live there, and the status is always re-derived from
/// it instead of being stored separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleControl {
    classes: Vec<String>,
    status_text: String,
    description_text: String,
}

impl ToggleControl {
    pub fn new(
        classes: impl IntoIterator<Item = impl Into<String>>,
        status_text: impl Into<String>,
        description_text: impl Into<String>,
    ) -> Self {
        let mut control = Self {
            classes: Vec::new(),
            status_text: status_text.into(),
            description_text: description_text.into(),
        };
        for class in classes {
            control.add_class(class);
        }
        control
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class unless it is already present (classList semantics)
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if class.is_empty() || self.has_class(&class) {
            return;
        }
        self.classes.push(class);
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn is_enabled(&self) -> bool {
        !self.has_class(DISABLED_CLASS)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.remove_class(DISABLED_CLASS);
        } else {
            self.add_class(DISABLED_CLASS);
        }
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn description_text(&self) -> &str {
        &self.description_text
    }

    pub fn set_status_text(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }

    pub fn set_description_text(&mut self, text: impl Into<String>) {
        self.description_text = text.into();
    }
}

/// Snapshot of one control as rendered by the server-side template
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlMarkup {
    pub class_name: String,
    pub status_text: String,
    pub description_text: String,
}

impl From<ControlMarkup> for ToggleControl {
    fn from(markup: ControlMarkup) -> Self {
        let classes = markup
            .class_name
            .split_whitespace()
            .filter(|c| *c != LOZENGE_CLASS)
            .map(str::to_string)
            .collect::<Vec<_>>();
        ToggleControl::new(classes, markup.status_text, markup.description_text)
    }
}

/// Initial page markup reported by the shell once the document is ready
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMarkup {
    pub mqtt: ControlMarkup,
    pub discovery: ControlMarkup,
}
