//! # mqttsync-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement [`SettingsRepository`](mqttsync_app::ports::SettingsRepository)
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between the configuration record and its database row
//!
//! ## Dependency rule
//! Depends on `mqttsync-app` (for port traits) and `mqttsync-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod settings_repo;

pub use pool::DatabaseConfig;
pub use settings_repo::SqliteSettingsRepository;
