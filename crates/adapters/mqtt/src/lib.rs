//! # mqttsync-adapter-mqtt
//!
//! MQTT side of the backend.
//!
//! ## Responsibilities
//! - Probe a broker once with the parameters of a connection test
//!   ([`RumqttcProbe`], implementing `BrokerProbe`)
//! - List the MQTT command line tools installed on the host
//!   ([`PathInventory`], implementing `SoftwareInventory`)
//!
//! ## Dependency rule
//! Same as other adapters: depends on `mqttsync-app` and `mqttsync-domain`.

pub mod config;
pub mod error;
pub mod inventory;
pub mod probe;

pub use config::{InventoryConfig, ProbeConfig};
pub use inventory::PathInventory;
pub use probe::RumqttcProbe;
