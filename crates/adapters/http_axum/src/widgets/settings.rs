//! Settings form fragment.
//!
//! The markup carries the element ids the form controller binds to. Values
//! come from the stored record.

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};
use mqttsync_domain::config::ConfigRecord;
use mqttsync_domain::view::{RevealState, TEST_IDLE_LABEL};

use crate::error::ApiError;
use crate::state::AppState;

/// Settings form template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate<'a> {
    enabled: bool,
    authenticated: bool,
    broker: &'a str,
    port: i64,
    user: &'a str,
    password: &'a str,
    password_type: &'static str,
    password_icon: &'static str,
    test_label: &'static str,
}

impl<'a> SettingsTemplate<'a> {
    /// Prefill the form with `record`, secrets masked.
    #[must_use]
    pub fn from_record(record: &'a ConfigRecord) -> Self {
        let masked = RevealState::Hidden;
        Self {
            enabled: record.enabled,
            authenticated: record.is_authenticated(),
            broker: &record.broker,
            port: record.port,
            user: &record.user,
            password: &record.password,
            password_type: masked.input_type(),
            password_icon: masked.icon(),
            test_label: TEST_IDLE_LABEL,
        }
    }
}

/// `GET /api/widgets/mqtt/settings`
pub async fn fragment<R, P, I>(
    State(state): State<AppState<R, P, I>>,
) -> Result<Html<String>, ApiError>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    let record = state.settings_service.load().await?;
    let html = SettingsTemplate::from_record(&record).render()?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqttsync_domain::dom::{AUTH_SECTION, FieldId, SETTINGS_SECTION, TEST_BUTTON, TEST_RESULT};

    fn record() -> ConfigRecord {
        ConfigRecord {
            enabled: true,
            broker: "10.0.0.5".to_string(),
            port: 1883,
            user: "admin".to_string(),
            password: "p\"w<d>".to_string(),
        }
    }

    fn render(record: &ConfigRecord) -> String {
        SettingsTemplate::from_record(record).render().unwrap()
    }

    #[test]
    fn should_carry_every_bound_element_id() {
        let html = render(&record());
        for field in FieldId::ALL {
            assert!(
                html.contains(&format!("id=\"{}\"", field.dom_id())),
                "missing {field}"
            );
        }
        let icon = FieldId::Password.icon_dom_id();
        for id in [
            SETTINGS_SECTION,
            AUTH_SECTION,
            TEST_BUTTON,
            TEST_RESULT,
            icon.as_str(),
        ] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
    }

    #[test]
    fn should_escape_stored_values() {
        let mut rec = record();
        rec.broker = "<script>alert(1)</script>".to_string();
        let html = render(&rec);
        assert!(html.contains("value=\"p&quot;w&lt;d&gt;\""));
        assert!(!html.contains("p\"w<d>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn should_mask_password_input() {
        let html = render(&record());
        assert!(html.contains("type=\"password\" id=\"mqtt_password\""));
        assert!(html.contains(RevealState::Hidden.icon()));
    }

    #[test]
    fn should_hide_sections_when_disabled_without_credentials() {
        let html = render(&ConfigRecord::default());
        assert!(html.contains("id=\"mqtt-settings\" style=\"display: none;\""));
        assert!(html.contains("id=\"mqtt-auth-settings\" style=\"display: none;\""));
        assert!(!html.contains(" checked"));
        assert!(html.contains("id=\"mqtt_port\" name=\"mqtt_port\" value=\"1883\""));
    }

    #[test]
    fn should_check_toggles_for_enabled_authenticated_record() {
        let html = render(&record());
        assert!(html.contains("id=\"mqtt_enabled\" name=\"mqtt_enabled\" checked"));
        assert!(html.contains("id=\"mqtt_auth_enabled\" name=\"mqtt_auth_enabled\" checked"));
        assert!(html.contains("<div id=\"mqtt-settings\">"));
        assert!(html.contains("<div id=\"mqtt-auth-settings\">"));
    }

    #[test]
    fn should_label_test_button_as_idle() {
        let html = render(&record());
        assert!(html.contains(&format!(">{TEST_IDLE_LABEL}</button>")));
    }
}
