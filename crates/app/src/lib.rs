//! # mqttsync-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SettingsGateway` — the widget endpoints, seen from the form
//!   - `SettingsRepository` — persistence of the configuration record
//!   - `BrokerProbe` — one-shot broker connectivity check
//!   - `SoftwareInventory` — installed software listing
//! - Define **driving/inbound ports** as use-case structs:
//!   - `FormSyncController` — auto-save form synchronization (client side)
//!   - `SettingsService` — load, save, test, status, dependencies (server side)
//!   - `StatusWidget` / `DependenciesWidget` — sibling read-only widgets
//! - Provide **in-process infrastructure** (cancel-and-restart timers)
//!
//! ## Dependency rule
//! Depends on `mqttsync-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod timer;
