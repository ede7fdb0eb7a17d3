//! Cancel-and-restart timer slots.
//!
//! A [`TimerSlot`] holds at most one pending timer. Arming it cancels the
//! previous one, and every arming hands out a [`TimerTicket`]. The timer task
//! must present its ticket through [`TimerSlot::fire`] before acting; a task
//! that woke up after being superseded or cancelled gets `false` and does
//! nothing. Slots are meant to live behind the same lock as the state their
//! timers mutate, so the check and the mutation happen atomically.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

/// One arming of a [`TimerSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket(u64);

/// Holder of at most one pending timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    epoch: u64,
    handle: Option<AbortHandle>,
}

impl TimerSlot {
    /// Cancel the pending timer (if any) and start a new one.
    ///
    /// `spawn` receives the ticket the new timer must fire with and returns
    /// the handle of the spawned task, or `None` when nothing could be
    /// spawned.
    pub fn restart(&mut self, spawn: impl FnOnce(TimerTicket) -> Option<AbortHandle>) {
        self.cancel();
        let ticket = TimerTicket(self.epoch);
        self.handle = spawn(ticket);
    }

    /// Cancel the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.epoch = self.epoch.wrapping_add(1);
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Claim the right to act for `ticket`.
    ///
    /// Returns `true` at most once per arming, and only if the slot was not
    /// re-armed or cancelled since.
    pub fn fire(&mut self, ticket: TimerTicket) -> bool {
        if ticket.0 != self.epoch || self.handle.is_none() {
            return false;
        }
        self.handle = None;
        self.epoch = self.epoch.wrapping_add(1);
        true
    }

    /// Whether a timer is currently pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }
}

/// Spawn `task` on the current Tokio runtime after `delay`.
///
/// Returns `None` (and logs) when called outside a runtime, e.g. while a
/// runtime is shutting down and a drop guard still wants to schedule work.
pub fn spawn_after<F>(delay: Duration, task: F) -> Option<AbortHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => Some(
            runtime
                .spawn(async move {
                    tokio::time::sleep(delay).await;
                    task.await;
                })
                .abort_handle(),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "no runtime available, timer dropped");
            None
        }
    }
}
