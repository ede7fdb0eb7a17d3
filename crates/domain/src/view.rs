//! View state of the settings widget.
//!
//! Everything the widget displays lives in [`ViewState`]. The controller
//! reads and writes this record; only the rendering boundary maps it onto
//! real elements.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::config::{ConfigRecord, TestRequest, parse_port};
use crate::dom::FieldId;

pub const SAVING_MESSAGE: &str = "Saving MQTT settings...";
pub const SAVED_MESSAGE: &str = "MQTT settings saved";
pub const SAVE_FAILED_PREFIX: &str = "Save failed: ";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error";

pub const TEST_IDLE_LABEL: &str = "Test connection";
pub const TEST_BUSY_LABEL: &str = "Testing connection...";
pub const TEST_OK_MESSAGE: &str = "Connection successful";
pub const TEST_FAILED_PREFIX: &str = "Connection failed: ";
pub const TEST_ERROR_PREFIX: &str = "Error while testing: ";

pub const RESTART_TITLE: &str = "Service restart required";
pub const RESTART_BODY: &str = "Changes take effect after the service restarts.";

/// Current values of the bound form controls.
///
/// Text inputs keep their raw content; interpretation happens in
/// [`collect`](Self::collect).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub enabled: bool,
    pub auth_enabled: bool,
    pub broker: String,
    pub port: String,
    pub user: String,
    pub password: String,
}

impl FormFields {
    /// Prefill the form from a stored record.
    #[must_use]
    pub fn from_record(record: &ConfigRecord) -> Self {
        Self {
            enabled: record.enabled,
            auth_enabled: record.is_authenticated(),
            broker: record.broker.clone(),
            port: record.port.to_string(),
            user: record.user.clone(),
            password: record.password.clone(),
        }
    }

    /// Build the record to persist.
    ///
    /// With authentication off, `user` and `password` are empty whatever the
    /// inputs still contain.
    #[must_use]
    pub fn collect(&self) -> ConfigRecord {
        let (user, password) = self.credentials();
        ConfigRecord {
            enabled: self.enabled,
            broker: self.broker.clone(),
            port: parse_port(&self.port),
            user,
            password,
        }
    }

    /// Build the throwaway connectivity-test request, same credential rule.
    #[must_use]
    pub fn test_request(&self) -> TestRequest {
        let (user, password) = self.credentials();
        TestRequest {
            broker: self.broker.clone(),
            port: parse_port(&self.port),
            user,
            password,
        }
    }

    fn credentials(&self) -> (String, String) {
        if self.auth_enabled {
            (self.user.clone(), self.password.clone())
        } else {
            (String::new(), String::new())
        }
    }

    /// Replace the content of a text input. Returns `false` for toggles.
    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) -> bool {
        let slot = match field {
            FieldId::Broker => &mut self.broker,
            FieldId::Port => &mut self.port,
            FieldId::User => &mut self.user,
            FieldId::Password => &mut self.password,
            FieldId::Enabled | FieldId::AuthEnabled => return false,
        };
        *slot = value.into();
        true
    }

    /// Flip a toggle to `checked`. Returns `false` for text inputs.
    pub fn set_toggle(&mut self, field: FieldId, checked: bool) -> bool {
        match field {
            FieldId::Enabled => self.enabled = checked,
            FieldId::AuthEnabled => self.auth_enabled = checked,
            _ => return false,
        }
        true
    }

    /// Empty the visible credential inputs.
    pub fn clear_credentials(&mut self) {
        self.user.clear();
        self.password.clear();
    }
}

impl fmt::Debug for FormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFields")
            .field("enabled", &self.enabled)
            .field("auth_enabled", &self.auth_enabled)
            .field("broker", &self.broker)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Phase of the floating save indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveIndicatorState {
    #[default]
    Hidden,
    Saving,
    Success,
    Error,
}

/// The floating save indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveIndicator {
    pub state: SaveIndicatorState,
    pub message: String,
}

impl SaveIndicator {
    #[must_use]
    pub fn new(state: SaveIndicatorState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }
}

/// Whether a secret input currently shows its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Revealed,
            Self::Revealed => Self::Hidden,
        }
    }

    /// `type` attribute of the input.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Hidden => "password",
            Self::Revealed => "text",
        }
    }

    /// Glyph shown on the reveal button.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Hidden => "\u{1F441}\u{FE0F}",
            Self::Revealed => "\u{1F648}",
        }
    }
}

/// Badge styling used by status texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeClass {
    #[default]
    None,
    Success,
    Warning,
    Error,
}

/// A persistent notice that dismisses itself after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique id for keyed rendering and dismissal.
    pub id: u32,
    pub title: String,
    pub body: String,
}

impl Notification {
    /// The "restart required" notice raised after a save.
    #[must_use]
    pub fn restart_required(id: u32) -> Self {
        Self {
            id,
            title: RESTART_TITLE.to_string(),
            body: RESTART_BODY.to_string(),
        }
    }
}

/// The connectivity-test button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestButton {
    pub enabled: bool,
    pub label: String,
}

impl Default for TestButton {
    fn default() -> Self {
        Self {
            enabled: true,
            label: TEST_IDLE_LABEL.to_string(),
        }
    }
}

/// Text next to the test button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResult {
    pub text: String,
    pub class: BadgeClass,
}

impl TestResult {
    #[must_use]
    pub fn new(text: impl Into<String>, class: BadgeClass) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Everything the settings widget shows.
///
/// `None` members model elements absent from the page; handlers that need
/// them do nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Markup injected into the settings container.
    pub container: Option<String>,
    pub form: Option<FormFields>,
    pub settings_visible: bool,
    pub auth_settings_visible: bool,
    pub save_indicator: Option<SaveIndicator>,
    pub notifications: Vec<Notification>,
    pub test_button: Option<TestButton>,
    pub test_result: Option<TestResult>,
    pub reveal: HashMap<FieldId, RevealState>,
}

impl ViewState {
    /// Bind a form and create the controls that come with it.
    pub fn mount(&mut self, fields: FormFields) {
        self.form = Some(fields);
        self.test_button = Some(TestButton::default());
        self.test_result = Some(TestResult::default());
        self.reveal = FieldId::ALL
            .into_iter()
            .filter(|field| field.is_secret())
            .map(|field| (field, RevealState::Hidden))
            .collect();
        self.sync_sections();
    }

    /// Show or hide the collapsible sections according to the toggles.
    pub fn sync_sections(&mut self) {
        if let Some(form) = &self.form {
            self.settings_visible = form.enabled;
            self.auth_settings_visible = form.auth_enabled;
        }
    }

    /// Phase of the save indicator, `Hidden` before the first save.
    #[must_use]
    pub fn indicator_state(&self) -> SaveIndicatorState {
        self.save_indicator
            .as_ref()
            .map_or(SaveIndicatorState::Hidden, |indicator| indicator.state)
    }

    /// Reveal state of a secret field, `None` when it is not bound.
    #[must_use]
    pub fn reveal_state(&self, field: FieldId) -> Option<RevealState> {
        self.reveal.get(&field).copied()
    }
}

/// Delays of the widget's self-clearing elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTimings {
    /// Save indicator returns to hidden after Success/Error.
    pub save_indicator_hide: Duration,
    /// Restart notification lifetime.
    pub restart_notice: Duration,
    /// Test result text lifetime.
    pub test_result_clear: Duration,
    /// Revealed secrets are masked again after this delay.
    pub reveal_auto_hide: Duration,
}

impl Default for WidgetTimings {
    fn default() -> Self {
        Self {
            save_indicator_hide: Duration::from_millis(3000),
            restart_notice: Duration::from_millis(8000),
            test_result_clear: Duration::from_millis(5000),
            reveal_auto_hide: Duration::from_millis(20_000),
        }
    }
}
