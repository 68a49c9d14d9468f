//! Session error types.
//!
//! Only connection-level failures and lookup failures surface as
//! [`SessionError`]. Table creation and inserts report through
//! [`StatementOutcome`](crate::session::StatementOutcome) instead.

use std::time::Duration;

use thiserror::Error;

/// Errors returned to callers of [`Session`](crate::session::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The connection URL could not be built from the target.
    #[error("invalid connection target: {0}")]
    InvalidTarget(String),

    /// Opening the connection failed (unreachable server, bad credentials).
    #[error("failed to connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    /// Opening the connection did not finish in time.
    #[error("timed out after {timeout:?} connecting to {target}")]
    ConnectTimeout { target: String, timeout: Duration },

    /// A lookup query failed.
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    /// Releasing the connection failed.
    #[error("failed to close connection: {0}")]
    Close(#[source] sqlx::Error),
}

impl SessionError {
    /// Whether this error came from establishing the connection.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget(_) | Self::Connection { .. } | Self::ConnectTimeout { .. }
        )
    }
}
