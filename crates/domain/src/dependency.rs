//! Software dependencies shown by the dependencies widget.

use serde::{Deserialize, Serialize};

/// Package names the backend reports as MQTT related.
pub const MQTT_PACKAGES: &[&str] = &[
    "paho-mqtt",
    "python-paho-mqtt",
    "mosquitto",
    "mosquitto-clients",
    "mosquitto_pub",
    "mosquitto_sub",
];

/// A tool the widget knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownTool {
    pub name: &'static str,
    pub display_name: &'static str,
}

/// Tools rendered as table rows, in display order.
pub const DISPLAYED_TOOLS: &[KnownTool] = &[KnownTool {
    name: "mosquitto_pub",
    display_name: "Mosquitto Publisher",
}];

/// One entry of the software inventory.
///
/// Only `name` is interpreted; every other key (version, path, …) is kept
/// verbatim for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareInfo {
    pub name: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl SoftwareInfo {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: serde_json::Map::new(),
        }
    }

    /// Attach a detail key.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Whether this entry belongs in the MQTT dependency list.
    #[must_use]
    pub fn is_mqtt_related(&self) -> bool {
        MQTT_PACKAGES.contains(&self.name.as_str())
    }
}

/// A row of the dependencies table.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyRow {
    Software {
        display_name: &'static str,
        software: SoftwareInfo,
    },
    /// Placeholder when none of the displayed tools were reported.
    Empty,
}

/// Build the table rows for the reported software list.
#[must_use]
pub fn dependency_rows(software: &[SoftwareInfo]) -> Vec<DependencyRow> {
    let rows: Vec<DependencyRow> = DISPLAYED_TOOLS
        .iter()
        .filter_map(|tool| {
            software
                .iter()
                .find(|info| info.name == tool.name)
                .map(|info| DependencyRow::Software {
                    display_name: tool.display_name,
                    software: info.clone(),
                })
        })
        .collect();

    if rows.is_empty() {
        vec![DependencyRow::Empty]
    } else {
        rows
    }
}
