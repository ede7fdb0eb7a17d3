//! Service status shown by the status widget.

use serde::{Deserialize, Serialize};

use crate::view::BadgeClass;

/// Running state of the MQTT publishing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// `active`, `inactive`, `error`, or anything the service reports.
    pub status: String,
    pub running: bool,
}

impl ServiceStatus {
    #[must_use]
    pub fn active() -> Self {
        Self {
            status: "active".to_string(),
            running: true,
        }
    }

    #[must_use]
    pub fn inactive() -> Self {
        Self {
            status: "inactive".to_string(),
            running: false,
        }
    }

    /// Status derived from the `enabled` flag of the stored configuration.
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::active()
        } else {
            Self::inactive()
        }
    }

    /// Badge shown next to the service name.
    #[must_use]
    pub fn badge(&self) -> StatusBadge {
        match self.status.as_str() {
            "active" => StatusBadge {
                class: BadgeClass::Success,
                text: "Active",
            },
            "inactive" => StatusBadge {
                class: BadgeClass::Warning,
                text: "Inactive",
            },
            "error" => StatusBadge {
                class: BadgeClass::Error,
                text: "Error",
            },
            _ => StatusBadge {
                class: BadgeClass::Warning,
                text: "Not Installed",
            },
        }
    }

    /// Text of the running indicator.
    #[must_use]
    pub fn running_label(&self) -> &'static str {
        if self.running { "Running" } else { "Stopped" }
    }

    /// CSS class of the running indicator.
    #[must_use]
    pub fn indicator_class(&self) -> &'static str {
        if self.running {
            "status-indicator running"
        } else {
            "status-indicator stopped"
        }
    }
}

/// Badge rendered by the status widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub class: BadgeClass,
    pub text: &'static str,
}
