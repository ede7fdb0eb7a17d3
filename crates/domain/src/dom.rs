//! Element identifiers shared by the settings fragment and the event bindings.
//!
//! The fragment served by `GET /api/widgets/mqtt/settings` must carry these
//! ids verbatim, otherwise the bindings have nothing to attach to.

pub const SETTINGS_SECTION: &str = "mqtt-settings";
pub const AUTH_SECTION: &str = "mqtt-auth-settings";
pub const TEST_BUTTON: &str = "mqtt-test-btn";
pub const TEST_RESULT: &str = "mqtt-test-result";

/// Suffix appended to a field id to name its reveal icon.
pub const ICON_SUFFIX: &str = "_icon";

/// Form controls bound by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Enabled,
    AuthEnabled,
    Broker,
    Port,
    User,
    Password,
}

impl FieldId {
    pub const ALL: [Self; 6] = [
        Self::Enabled,
        Self::AuthEnabled,
        Self::Broker,
        Self::Port,
        Self::User,
        Self::Password,
    ];

    /// The element id in the settings fragment.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Enabled => "mqtt_enabled",
            Self::AuthEnabled => "mqtt_auth_enabled",
            Self::Broker => "mqtt_broker",
            Self::Port => "mqtt_port",
            Self::User => "mqtt_user",
            Self::Password => "mqtt_password",
        }
    }

    /// Id of the reveal icon attached to this field.
    #[must_use]
    pub fn icon_dom_id(self) -> String {
        format!("{}{ICON_SUFFIX}", self.dom_id())
    }

    /// Text inputs saved when they lose focus.
    #[must_use]
    pub const fn saves_on_blur(self) -> bool {
        matches!(self, Self::Broker | Self::Port | Self::User | Self::Password)
    }

    /// Inputs rendered masked with a reveal affordance.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dom_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_icon_after_field() {
        assert_eq!(FieldId::Password.icon_dom_id(), "mqtt_password_icon");
    }

    #[test]
    fn should_save_text_inputs_on_blur_only() {
        let on_blur: Vec<FieldId> = FieldId::ALL
            .into_iter()
            .filter(|field| field.saves_on_blur())
            .collect();
        assert_eq!(
            on_blur,
            vec![FieldId::Broker, FieldId::Port, FieldId::User, FieldId::Password]
        );
    }

    #[test]
    fn should_only_mask_the_password() {
        let secrets: Vec<FieldId> = FieldId::ALL
            .into_iter()
            .filter(|field| field.is_secret())
            .collect();
        assert_eq!(secrets, vec![FieldId::Password]);
    }
}
