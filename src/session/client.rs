//! Database session over a single sqlx connection.

use sqlx::any::{AnyConnectOptions, install_default_drivers};
use sqlx::{AnyConnection, ConnectOptions, Connection, Row};

use crate::session::statements::Statements;
use crate::session::{ConnectTarget, Credentials, SessionError, StatementOutcome};

/// One live connection plus the target and user it was opened with.
///
/// The connection is owned exclusively by the session. [`Session::close`]
/// consumes it, so no operation can run on a closed session.
pub struct Session {
    conn: AnyConnection,
    target: ConnectTarget,
    user: String,
    redacted_url: String,
    statements: Statements,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.redacted_url)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Connect to `database` on the loopback Postgres-wire server as `user`.
    ///
    /// The session's schema is `testSchema`.
    ///
    /// # Errors
    /// Returns a connection-level [`SessionError`] if the server is
    /// unreachable or rejects the credentials.
    pub async fn connect(
        user: &str,
        password: &str,
        database: &str,
    ) -> Result<Self, SessionError> {
        Self::open(
            &ConnectTarget::postgres(database),
            &Credentials::new(user, password),
        )
        .await
    }

    /// Open a session against an arbitrary target.
    ///
    /// # Errors
    /// Returns a connection-level [`SessionError`] if the URL cannot be
    /// built, the connect attempt fails, or it exceeds the target's timeout.
    pub async fn open(
        target: &ConnectTarget,
        credentials: &Credentials,
    ) -> Result<Self, SessionError> {
        install_default_drivers();

        let url = target.connection_url(credentials)?;
        let redacted_url = target.redacted_url(credentials);

        if !target.driver.is_server() {
            tracing::debug!(
                "Driver '{}' ignores user, password and schema '{}'",
                target.driver,
                target.schema
            );
        }

        let options =
            AnyConnectOptions::from_url(&url).map_err(|source| SessionError::Connection {
                target: redacted_url.clone(),
                source,
            })?;

        tracing::debug!("Connecting to {}", redacted_url);

        let conn = tokio::time::timeout(target.connect_timeout, options.connect())
            .await
            .map_err(|_| SessionError::ConnectTimeout {
                target: redacted_url.clone(),
                timeout: target.connect_timeout,
            })?
            .map_err(|source| SessionError::Connection {
                target: redacted_url.clone(),
                source,
            })?;

        tracing::info!("Connected to {} as '{}'", redacted_url, credentials.user);

        Ok(Self {
            conn,
            target: target.clone(),
            user: credentials.user.clone(),
            redacted_url,
            statements: Statements::for_driver(target.driver),
        })
    }

    /// Create the two-column `names` table.
    ///
    /// Failures are logged and swallowed; the outcome says which branch ran.
    pub async fn create_name_table(&mut self) -> StatementOutcome {
        match self.try_create_name_table().await {
            Ok(()) => {
                tracing::debug!("Created table 'names'");
                StatementOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Skipping table creation: {}", e);
                StatementOutcome::from_error(&e)
            }
        }
    }

    /// Insert one `(id, name)` row. The id must be unique.
    ///
    /// Failures (duplicate id, missing table, ...) are logged and swallowed,
    /// leaving the row absent.
    pub async fn insert_name(&mut self, id: i32, name: &str) -> StatementOutcome {
        match self.try_insert_name(id, name).await {
            Ok(()) => {
                tracing::debug!("Inserted row ({}, '{}') into 'names'", id, name);
                StatementOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Skipping insert...");
                tracing::debug!("Insert of id {} failed: {}", id, e);
                StatementOutcome::from_error(&e)
            }
        }
    }

    /// Name stored for `id`, or `None` if no row matches.
    ///
    /// # Errors
    /// Returns [`SessionError::Query`] if the lookup fails.
    pub async fn get_name(&mut self, id: i32) -> Result<Option<String>, SessionError> {
        let row = sqlx::query(self.statements.select)
            .bind(id)
            .fetch_optional(&mut self.conn)
            .await
            .map_err(SessionError::Query)?;

        let name = row
            .map(|row| row.try_get::<Option<String>, _>(0))
            .transpose()
            .map_err(SessionError::Query)?
            .flatten();

        Ok(name)
    }

    /// Release the connection.
    ///
    /// # Errors
    /// Returns [`SessionError::Close`] if the driver fails to shut down cleanly.
    pub async fn close(self) -> Result<(), SessionError> {
        tracing::info!("Closing connection to {}", self.redacted_url);
        self.conn.close().await.map_err(SessionError::Close)
    }

    pub fn target(&self) -> &ConnectTarget {
        &self.target
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    async fn try_create_name_table(&mut self) -> Result<(), sqlx::Error> {
        let sql = self.statements.create_table;
        // Uncommitted transactions roll back on drop.
        let mut tx = self.conn.begin().await?;
        sqlx::query(sql).execute(&mut *tx).await?;
        tx.commit().await
    }

    async fn try_insert_name(&mut self, id: i32, name: &str) -> Result<(), sqlx::Error> {
        let sql = self.statements.insert;
        let mut tx = self.conn.begin().await?;
        sqlx::query(sql)
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }
}
