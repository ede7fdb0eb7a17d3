//! Read-only widgets shown next to the settings form.

use std::sync::Arc;

use mqttsync_domain::dependency::{DependencyRow, dependency_rows};
use mqttsync_domain::status::{ServiceStatus, StatusBadge};
use mqttsync_domain::view::BadgeClass;

use crate::ports::SettingsGateway;

/// What the status widget renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Loaded {
        badge: StatusBadge,
        running_label: &'static str,
        indicator_class: &'static str,
    },
    Failed {
        message: String,
    },
}

impl StatusView {
    #[must_use]
    pub fn from_status(status: &ServiceStatus) -> Self {
        Self::Loaded {
            badge: status.badge(),
            running_label: status.running_label(),
            indicator_class: status.indicator_class(),
        }
    }

    /// Badge of the view; failures render as an error badge.
    #[must_use]
    pub fn badge(&self) -> StatusBadge {
        match self {
            Self::Loaded { badge, .. } => *badge,
            Self::Failed { .. } => StatusBadge {
                class: BadgeClass::Error,
                text: "Error",
            },
        }
    }
}

/// Service status widget.
pub struct StatusWidget<G> {
    gateway: Arc<G>,
}

impl<G: SettingsGateway> StatusWidget<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetch the status and map it for display.
    pub async fn refresh(&self) -> StatusView {
        match self.gateway.fetch_status().await {
            Ok(status) => StatusView::from_status(&status),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load MQTT service status");
                StatusView::Failed {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// What the dependencies widget renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DependenciesView {
    Loaded(Vec<DependencyRow>),
    Failed { message: String },
}

/// Installed MQTT tools widget.
pub struct DependenciesWidget<G> {
    gateway: Arc<G>,
}

impl<G: SettingsGateway> DependenciesWidget<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn refresh(&self) -> DependenciesView {
        match self.gateway.fetch_dependencies().await {
            Ok(software) => DependenciesView::Loaded(dependency_rows(&software)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load MQTT dependencies");
                DependenciesView::Failed {
                    message: err.to_string(),
                }
            }
        }
    }
}
