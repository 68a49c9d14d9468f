//! Connection targets and credentials.
//!
//! A [`ConnectTarget`] names where a session connects to; [`Credentials`]
//! carry who it connects as. Together they produce the driver URL handed to
//! sqlx's `Any` front-end.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use url::Url;

use crate::session::SessionError;

/// Loopback host every server-backed session connects to.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Schema attached to every session unless overridden.
pub const DEFAULT_SCHEMA: &str = "testSchema";

/// Default upper bound on a single connect attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Database name that selects an in-memory SQLite database.
pub const SQLITE_MEMORY: &str = ":memory:";

/// Database backend a session talks to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatabaseDriver {
    /// Postgres wire protocol server (Postgres, CockroachDB, ...).
    #[default]
    Postgres,
    /// Embedded SQLite file or in-memory database.
    Sqlite,
}

impl DatabaseDriver {
    /// Whether this backend authenticates and resolves schemas.
    pub fn is_server(self) -> bool {
        matches!(self, Self::Postgres)
    }
}

/// User name and password for a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Where a session connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub driver: DatabaseDriver,
    /// Server port; `None` uses the driver default.
    pub port: Option<u16>,
    /// Database name (a file path or `:memory:` for SQLite).
    pub database: String,
    pub schema: String,
    pub connect_timeout: Duration,
}

impl ConnectTarget {
    /// Postgres-wire server on the loopback host with the default schema.
    pub fn postgres(database: impl Into<String>) -> Self {
        Self {
            driver: DatabaseDriver::Postgres,
            port: None,
            database: database.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// SQLite database at `path`, created if missing.
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            driver: DatabaseDriver::Sqlite,
            database: path.into(),
            ..Self::postgres("")
        }
    }

    /// In-memory SQLite database, discarded on close.
    pub fn sqlite_memory() -> Self {
        Self::sqlite(SQLITE_MEMORY)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Build the driver URL for this target.
    ///
    /// Postgres URLs carry the credentials and set `search_path` to the
    /// schema through the `options` startup parameter. The schema is quoted
    /// so the server keeps its case. SQLite URLs ignore credentials and
    /// schema.
    pub fn connection_url(&self, credentials: &Credentials) -> Result<Url, SessionError> {
        match self.driver {
            DatabaseDriver::Postgres => self.postgres_url(credentials),
            DatabaseDriver::Sqlite => self.sqlite_url(),
        }
    }

    /// Connection URL with the password masked, for logs and errors.
    pub fn redacted_url(&self, credentials: &Credentials) -> String {
        match self.connection_url(credentials) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.to_string()
            }
            Err(_) => format!("{}://{}/{}", self.driver, LOOPBACK_HOST, self.database),
        }
    }

    fn postgres_url(&self, credentials: &Credentials) -> Result<Url, SessionError> {
        let invalid = |what: &str| {
            SessionError::InvalidTarget(format!("cannot encode {} into connection url", what))
        };

        let mut url = Url::parse(&format!("postgres://{}", LOOPBACK_HOST))
            .map_err(|e| SessionError::InvalidTarget(e.to_string()))?;

        url.set_port(self.port).map_err(|_| invalid("port"))?;
        url.set_path(&self.database);
        if !credentials.user.is_empty() {
            url.set_username(&credentials.user)
                .map_err(|_| invalid("user"))?;
        }
        if !credentials.password.is_empty() {
            url.set_password(Some(&credentials.password))
                .map_err(|_| invalid("password"))?;
        }
        if !self.schema.is_empty() {
            url.query_pairs_mut()
                .append_pair("options", &format!("-c search_path=\"{}\"", self.schema));
        }

        Ok(url)
    }

    fn sqlite_url(&self) -> Result<Url, SessionError> {
        let raw = if self.database == SQLITE_MEMORY {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}?mode=rwc", self.database)
        };
        Url::parse(&raw).map_err(|e| {
            SessionError::InvalidTarget(format!("sqlite database '{}': {}", self.database, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn demo_credentials() -> Credentials {
        Credentials::new("dba", "bird")
    }

    #[test]
    fn test_postgres_url_defaults() {
        let url = ConnectTarget::postgres("testDB")
            .connection_url(&demo_credentials())
            .unwrap();

        assert_eq!(url.scheme(), "postgres");
        assert_eq!(url.host_str(), Some(LOOPBACK_HOST));
        assert_eq!(url.port(), None);
        assert_eq!(url.path(), "/testDB");
        assert_eq!(url.username(), "dba");
        assert_eq!(url.password(), Some("bird"));

        let options: Vec<_> = url.query_pairs().collect();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].0, "options");
        assert_eq!(options[0].1, "-c search_path=\"testSchema\"");
    }

    #[test]
    fn test_postgres_url_with_port_and_schema() {
        let url = ConnectTarget::postgres("inventory")
            .with_port(26257)
            .with_schema("app")
            .connection_url(&demo_credentials())
            .unwrap();

        assert_eq!(url.port(), Some(26257));
        assert!(url.query_pairs().any(|(_, v)| v == "-c search_path=\"app\""));
    }

    #[test]
    fn test_postgres_url_encodes_password() {
        let credentials = Credentials::new("dba", "p@ss/word");
        let url = ConnectTarget::postgres("testDB")
            .connection_url(&credentials)
            .unwrap();

        assert_eq!(url.host_str(), Some(LOOPBACK_HOST));
        assert_ne!(url.password(), Some("p@ss/word"));
        assert!(url.password().unwrap().contains("%40"));
    }

    #[test]
    fn test_sqlite_urls() {
        let credentials = demo_credentials();

        let memory = ConnectTarget::sqlite_memory()
            .connection_url(&credentials)
            .unwrap();
        assert_eq!(memory.as_str(), "sqlite::memory:");

        let file = ConnectTarget::sqlite("data/testDB.db")
            .connection_url(&credentials)
            .unwrap();
        assert_eq!(file.scheme(), "sqlite");
        assert_eq!(file.username(), "");
        assert!(file.as_str().ends_with("mode=rwc"));
    }

    #[test]
    fn test_redacted_url_hides_password() {
        let redacted = ConnectTarget::postgres("testDB").redacted_url(&demo_credentials());
        assert!(redacted.contains("***"));
        assert!(!redacted.contains("bird"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let printed = format!("{:?}", demo_credentials());
        assert!(printed.contains("dba"));
        assert!(!printed.contains("bird"));
    }

    #[test]
    fn test_driver_enum() {
        assert_eq!(
            DatabaseDriver::from_str("SQLITE").unwrap(),
            DatabaseDriver::Sqlite
        );
        assert_eq!(DatabaseDriver::Postgres.as_ref(), "postgres");
        assert!(DatabaseDriver::Postgres.is_server());
        assert!(!DatabaseDriver::Sqlite.is_server());
    }
}
