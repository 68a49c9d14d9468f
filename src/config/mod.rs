//! Configuration module for hellodb.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Database settings (driver, port, database, schema, credentials, timeout)
//! - Demo row settings (id, name)

mod app;
mod validation;

pub use app::{AppConfig, DatabaseConfig, DemoConfig};
pub use validation::{ConfigError, expand_env_vars, parse_duration, validate_identifier};

// Re-export constants
pub use app::{
    DEFAULT_DATABASE, DEFAULT_DEMO_ID, DEFAULT_DEMO_NAME, DEFAULT_PASSWORD, DEFAULT_USER,
};
pub use crate::session::DatabaseDriver;
