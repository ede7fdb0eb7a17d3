//! # mqttsync-domain
//!
//! Pure domain model for the MQTT settings widget and its backend.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **configuration record** persisted by the backend and the
//!   throwaway **test request** used for connectivity checks
//! - Define the **wire payloads** exchanged with the widget endpoints
//! - Define the **view state** of the settings widget (form fields, save
//!   indicator, reveal state, notifications, test badge) so that the sync
//!   logic never touches a DOM
//! - Define the read-side helpers of the sibling widgets (status badge,
//!   dependency rows)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod config;
pub mod dependency;
pub mod dom;
pub mod response;
pub mod status;
pub mod view;
