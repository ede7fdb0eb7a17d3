//! Form sync controller — auto-save of the MQTT settings form.
//!
//! The controller owns the widget's [`ViewState`] and every timer that
//! mutates it. Event bindings call the `on_*` handlers; the rendering
//! boundary reads [`FormSyncController::view`]. All state sits behind one
//! mutex that is never held across an `.await`.
//!
//! Saves are never retried or coalesced: each trigger issues one request.
//! Each save is tagged with a generation number and a response that belongs
//! to a superseded save does not touch the indicator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use askama::Template;

use mqttsync_domain::config::ConfigRecord;
use mqttsync_domain::dom::FieldId;
use mqttsync_domain::error::FormError;
use mqttsync_domain::response::SaveAck;
use mqttsync_domain::view::{
    BadgeClass, CONNECTION_ERROR_MESSAGE, FormFields, Notification, RevealState,
    SAVE_FAILED_PREFIX, SAVED_MESSAGE, SAVING_MESSAGE, SaveIndicator, SaveIndicatorState,
    TEST_BUSY_LABEL, TEST_ERROR_PREFIX, TEST_FAILED_PREFIX, TEST_OK_MESSAGE, TestButton,
    TestResult, ViewState, WidgetTimings,
};

use crate::ports::SettingsGateway;
use crate::timer::{TimerSlot, spawn_after};

const LOAD_ERROR_FALLBACK: &str = "<div class=\"error\">Failed to load MQTT settings</div>";

/// Shown in the container when the settings fragment cannot be loaded.
#[derive(Template)]
#[template(
    source = "<div class=\"error\">Failed to load MQTT settings: {{ message }}</div>",
    ext = "html"
)]
struct LoadErrorTemplate<'a> {
    message: &'a str,
}

/// State shared between the controller and its timers.
#[derive(Default)]
struct Inner {
    view: ViewState,
    save_generation: u64,
    next_notice_id: u32,
    save_hide: TimerSlot,
    test_clear: TimerSlot,
    reveal_timers: HashMap<FieldId, TimerSlot>,
    notice_timers: HashMap<u32, TimerSlot>,
}

type Shared = Arc<Mutex<Inner>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Inner> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives the settings widget: collect, auto-save, test, reveal.
///
/// Cloning is cheap and clones share the same view and timers.
/// Handlers that schedule timers must run inside a Tokio runtime.
pub struct FormSyncController<G> {
    gateway: Arc<G>,
    shared: Shared,
    timings: WidgetTimings,
}

impl<G> Clone for FormSyncController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            shared: Arc::clone(&self.shared),
            timings: self.timings,
        }
    }
}

impl<G: SettingsGateway + 'static> FormSyncController<G> {
    /// Create a controller with the default delays.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Arc::new(gateway),
            shared: Arc::new(Mutex::new(Inner::default())),
            timings: WidgetTimings::default(),
        }
    }

    /// Snapshot of what the widget currently shows.
    #[must_use]
    pub fn view(&self) -> ViewState {
        lock(&self.shared).view.clone()
    }

    /// Load the settings fragment into the container.
    ///
    /// A failed load leaves an error fragment in the container instead.
    pub async fn inject(&self) {
        let fragment = match self.gateway.load_settings_widget().await {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(error = %err, "failed to load MQTT settings widget");
                let message = err.to_string();
                LoadErrorTemplate { message: &message }
                    .render()
                    .unwrap_or_else(|render_err| {
                        tracing::warn!(error = %render_err, "unable to render load error");
                        LOAD_ERROR_FALLBACK.to_string()
                    })
            }
        };
        lock(&self.shared).view.container = Some(fragment);
    }

    /// Bind the form controls found in the injected fragment.
    ///
    /// Pending reveal timers of a previous form are dropped.
    pub fn mount(&self, fields: FormFields) {
        let mut inner = lock(&self.shared);
        for slot in inner.reveal_timers.values_mut() {
            slot.cancel();
        }
        inner.reveal_timers.clear();
        inner.view.mount(fields);
        tracing::debug!("MQTT settings form mounted");
    }

    /// The record a save would send right now, `None` without a form.
    #[must_use]
    pub fn collect_config(&self) -> Option<ConfigRecord> {
        lock(&self.shared).view.form.as_ref().map(FormFields::collect)
    }

    /// Text typed into an input. Returns `false` when nothing was updated.
    pub fn on_input(&self, field: FieldId, value: impl Into<String>) -> bool {
        lock(&self.shared)
            .view
            .form
            .as_mut()
            .is_some_and(|form| form.set_text(field, value))
    }

    /// An input lost focus; broker, port and credentials save on blur.
    pub async fn on_blur(&self, field: FieldId) {
        if field.saves_on_blur() {
            self.auto_save().await;
        }
    }

    /// A switch changed; saves immediately.
    ///
    /// Turning authentication off also empties the visible credential inputs,
    /// in the same step that starts the save.
    pub async fn on_toggle(&self, field: FieldId, checked: bool) {
        let pending = {
            let mut inner = lock(&self.shared);
            let Some(form) = inner.view.form.as_mut() else {
                return;
            };
            if !form.set_toggle(field, checked) {
                return;
            }
            if field == FieldId::AuthEnabled && !checked {
                form.clear_credentials();
            }
            inner.view.sync_sections();
            self.begin_save(&mut inner)
        };

        if let Some((generation, record)) = pending {
            let result = self.gateway.save(record).await;
            self.finish_save(generation, result);
        }
    }

    /// Persist the current form.
    ///
    /// Shows `Saving`, issues one request, then shows `Success` or `Error`
    /// and schedules the indicator to hide.
    pub async fn auto_save(&self) {
        let pending = self.begin_save(&mut lock(&self.shared));
        if let Some((generation, record)) = pending {
            let result = self.gateway.save(record).await;
            self.finish_save(generation, result);
        }
    }

    fn begin_save(&self, inner: &mut Inner) -> Option<(u64, ConfigRecord)> {
        let Some(record) = inner.view.form.as_ref().map(FormFields::collect) else {
            tracing::debug!("no MQTT form bound, skipping save");
            return None;
        };
        inner.save_generation += 1;
        inner.save_hide.cancel();
        inner.view.save_indicator = Some(SaveIndicator::new(
            SaveIndicatorState::Saving,
            SAVING_MESSAGE,
        ));
        tracing::debug!(
            generation = inner.save_generation,
            broker = %record.broker,
            port = record.port,
            "saving MQTT settings"
        );
        Some((inner.save_generation, record))
    }

    fn finish_save(&self, generation: u64, result: Result<SaveAck, FormError>) {
        let mut inner = lock(&self.shared);

        if let Ok(SaveAck {
            restart_required: true,
        }) = result
        {
            self.push_restart_notice(&mut inner);
        }

        if generation != inner.save_generation {
            tracing::debug!(
                generation,
                latest = inner.save_generation,
                "discarding superseded save response"
            );
            return;
        }

        let indicator = match result {
            Ok(_) => SaveIndicator::new(SaveIndicatorState::Success, SAVED_MESSAGE),
            Err(err @ FormError::Application { .. }) => {
                tracing::warn!(error = %err, "MQTT settings rejected");
                SaveIndicator::new(
                    SaveIndicatorState::Error,
                    format!("{SAVE_FAILED_PREFIX}{err}"),
                )
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save MQTT settings");
                SaveIndicator::new(SaveIndicatorState::Error, CONNECTION_ERROR_MESSAGE)
            }
        };
        inner.view.save_indicator = Some(indicator);

        let shared = Arc::clone(&self.shared);
        let delay = self.timings.save_indicator_hide;
        inner.save_hide.restart(move |ticket| {
            spawn_after(delay, async move {
                let mut inner = lock(&shared);
                if inner.save_hide.fire(ticket)
                    && let Some(indicator) = inner.view.save_indicator.as_mut()
                {
                    indicator.state = SaveIndicatorState::Hidden;
                }
            })
        });
    }

    fn push_restart_notice(&self, inner: &mut Inner) {
        let id = inner.next_notice_id;
        inner.next_notice_id = id.wrapping_add(1);
        inner.view.notifications.push(Notification::restart_required(id));
        tracing::info!(id, "MQTT service restart required");

        let shared = Arc::clone(&self.shared);
        let delay = self.timings.restart_notice;
        inner
            .notice_timers
            .entry(id)
            .or_default()
            .restart(move |ticket| {
                spawn_after(delay, async move {
                    let mut inner = lock(&shared);
                    let due = inner
                        .notice_timers
                        .get_mut(&id)
                        .is_some_and(|slot| slot.fire(ticket));
                    if due {
                        inner.notice_timers.remove(&id);
                        inner.view.notifications.retain(|notice| notice.id != id);
                    }
                })
            });
    }

    /// Close a notification before its timer does.
    pub fn dismiss_notification(&self, id: u32) -> bool {
        let mut inner = lock(&self.shared);
        if let Some(mut slot) = inner.notice_timers.remove(&id) {
            slot.cancel();
        }
        let before = inner.view.notifications.len();
        inner.view.notifications.retain(|notice| notice.id != id);
        inner.view.notifications.len() != before
    }

    /// Ask the backend whether the broker in the form is reachable.
    ///
    /// The button stays disabled while the request is in flight; a second
    /// call meanwhile does nothing. Whatever happens, including the future
    /// being dropped, the button is re-enabled and the result text is
    /// cleared after a delay.
    pub async fn test_connection(&self) {
        let request = {
            let mut guard = lock(&self.shared);
            let view = &mut guard.view;
            let (Some(form), Some(button), Some(result)) = (
                view.form.as_ref(),
                view.test_button.as_mut(),
                view.test_result.as_mut(),
            ) else {
                return;
            };
            if !button.enabled {
                tracing::debug!("connection test already running");
                return;
            }
            button.enabled = false;
            button.label = TEST_BUSY_LABEL.to_string();
            *result = TestResult::default();
            form.test_request()
        };

        let mut run = TestRun {
            controller: self,
            result: None,
        };
        tracing::debug!(broker = %request.broker, port = request.port, "testing MQTT connection");
        run.result = Some(match self.gateway.test_connection(request).await {
            Ok(()) => TestResult::new(TEST_OK_MESSAGE, BadgeClass::Success),
            Err(err @ FormError::Application { .. }) => {
                tracing::info!(error = %err, "MQTT connection test failed");
                TestResult::new(format!("{TEST_FAILED_PREFIX}{err}"), BadgeClass::Error)
            }
            Err(err) => {
                tracing::error!(error = %err, "MQTT connection test errored");
                TestResult::new(format!("{TEST_ERROR_PREFIX}{err}"), BadgeClass::Error)
            }
        });
    }

    fn end_test(&self, result: Option<TestResult>) {
        let mut inner = lock(&self.shared);
        if let (Some(slot), Some(result)) = (inner.view.test_result.as_mut(), result) {
            *slot = result;
        }
        if let Some(button) = inner.view.test_button.as_mut() {
            *button = TestButton::default();
        }

        let shared = Arc::clone(&self.shared);
        let delay = self.timings.test_result_clear;
        inner.test_clear.restart(move |ticket| {
            spawn_after(delay, async move {
                let mut inner = lock(&shared);
                if inner.test_clear.fire(ticket)
                    && let Some(result) = inner.view.test_result.as_mut()
                {
                    *result = TestResult::default();
                }
            })
        });
    }

    /// Flip a secret input between masked and plain.
    ///
    /// Revealing (re)starts the auto-hide timer; hiding by hand cancels it.
    /// Returns the new state, `None` when the field is not a bound secret.
    pub fn toggle_password_visibility(&self, field: FieldId) -> Option<RevealState> {
        let mut guard = lock(&self.shared);
        let inner = &mut *guard;
        let Some(state) = inner.view.reveal.get_mut(&field) else {
            tracing::debug!(%field, "no secret input bound, ignoring reveal");
            return None;
        };
        let next = state.toggled();
        *state = next;

        let slot = inner.reveal_timers.entry(field).or_default();
        match next {
            RevealState::Revealed => {
                let shared = Arc::clone(&self.shared);
                let delay = self.timings.reveal_auto_hide;
                slot.restart(move |ticket| {
                    spawn_after(delay, async move {
                        let mut guard = lock(&shared);
                        let inner = &mut *guard;
                        let due = inner
                            .reveal_timers
                            .get_mut(&field)
                            .is_some_and(|slot| slot.fire(ticket));
                        if due && let Some(state) = inner.view.reveal.get_mut(&field) {
                            *state = RevealState::Hidden;
                            tracing::debug!(%field, "secret masked again");
                        }
                    })
                });
            }
            RevealState::Hidden => {
                slot.cancel();
            }
        }
        Some(next)
    }
}

/// Restores the test button when the connection test ends, however it ends.
struct TestRun<'a, G: SettingsGateway + 'static> {
    controller: &'a FormSyncController<G>,
    result: Option<TestResult>,
}

impl<G: SettingsGateway + 'static> Drop for TestRun<'_, G> {
    fn drop(&mut self) {
        self.controller.end_test(self.result.take());
    }
}
