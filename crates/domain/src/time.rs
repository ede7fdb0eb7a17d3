//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp attached to status and dependency payloads.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
