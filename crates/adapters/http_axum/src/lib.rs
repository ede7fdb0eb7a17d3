//! # mqttsync-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **settings API** used by the form
//!   (`POST /api/mqtt/save`, `POST /api/mqtt/test`, `GET /api/mqtt/status`)
//! - Serve the **widget endpoints**: the settings form fragment
//!   (`GET /api/widgets/mqtt/settings`) and the read-only status and
//!   dependencies payloads
//! - Map HTTP requests into [`SettingsService`] calls (driving adapter)
//! - Map results and errors into `{success, error?}` JSON bodies
//!
//! ## Dependency rule
//! Depends on `mqttsync-app` (for port traits and services) and
//! `mqttsync-domain` (for wire types). Never leaks axum types into the domain.
//!
//! [`SettingsService`]: mqttsync_app::services::settings_service::SettingsService

pub mod api;
pub mod error;
pub mod router;
pub mod state;
pub mod widgets;
