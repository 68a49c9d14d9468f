//! Application configuration structures.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::session::{
    ConnectTarget, Credentials, DEFAULT_CONNECT_TIMEOUT, DEFAULT_SCHEMA, DatabaseDriver,
};

use super::validation::{ConfigError, expand_env_vars, validate_identifier};

// =============================================================================
// Constants
// =============================================================================

/// Demo user.
pub const DEFAULT_USER: &str = "dba";

/// Demo password.
pub const DEFAULT_PASSWORD: &str = "bird";

/// Demo database name.
pub const DEFAULT_DATABASE: &str = "testDB";

/// Id of the demo row.
pub const DEFAULT_DEMO_ID: i32 = 12;

/// Name of the demo row.
pub const DEFAULT_DEMO_NAME: &str = "fred";

// =============================================================================
// Database Configuration
// =============================================================================

/// Database connection configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Backend driver (default: postgres).
    pub driver: DatabaseDriver,

    /// Server port (default: driver default).
    pub port: Option<u16>,

    /// Database name, or SQLite file path (default: "testDB").
    pub name: String,

    /// Schema for the session (default: "testSchema").
    pub schema: String,

    /// User name; `${VAR}` references are expanded on load.
    pub user: String,

    /// Password; `${VAR}` references are expanded on load.
    pub password: String,

    /// Connect timeout (default: "30s").
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            port: None,
            name: DEFAULT_DATABASE.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("user", &self.user)
            .field("password", &"***")
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// Connection target described by this configuration.
    pub fn target(&self) -> ConnectTarget {
        ConnectTarget {
            driver: self.driver,
            port: self.port,
            database: self.name.clone(),
            schema: self.schema.clone(),
            connect_timeout: self.connect_timeout,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.user, &self.password)
    }
}

// =============================================================================
// Demo Configuration
// =============================================================================

/// Row the binary inserts and reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub id: i32,
    pub name: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_DEMO_ID,
            name: DEFAULT_DEMO_NAME.to_string(),
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Demo row settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text, expanding env references in
    /// credentials, then validate.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.database.user = expand_env_vars(&config.database.user);
        config.database.password = expand_env_vars(&config.database.password);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;

        if db.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database name must not be empty".to_string(),
            ));
        }

        if db.port == Some(0) {
            return Err(ConfigError::ValidationError(
                "database port must be non-zero".to_string(),
            ));
        }

        if db.connect_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "database connect_timeout must be positive".to_string(),
            ));
        }

        validate_identifier(&db.schema)
            .map_err(|e| ConfigError::ValidationError(format!("database schema: {}", e)))?;

        if db.driver.is_server() && db.user.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "database user must not be empty for driver '{}'",
                db.driver
            )));
        }

        Ok(())
    }
}
