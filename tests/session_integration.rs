//! Session Integration Tests for hellodb
//!
//! Exercises the session end to end against SQLite, plus connection
//! failures against a closed loopback port.

use std::time::Duration;

use hellodb::{AppConfig, ConnectTarget, Credentials, Session, SessionError, StatementOutcome};
use tempfile::tempdir;

// =============================================================================
// Test Helpers
// =============================================================================

fn demo_credentials() -> Credentials {
    Credentials::new("dba", "bird")
}

/// Loopback port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    listener.local_addr().expect("Failed to get local addr").port()
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[tokio::test]
async fn test_demo_scenario_on_sqlite_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("testDB.db");
    let target = ConnectTarget::sqlite(path.to_string_lossy());

    let mut session = Session::open(&target, &demo_credentials())
        .await
        .expect("Failed to open session");

    assert_eq!(session.create_name_table().await, StatementOutcome::Applied);
    assert_eq!(
        session.insert_name(12, "fred").await,
        StatementOutcome::Applied
    );
    assert_eq!(session.get_name(12).await.unwrap().as_deref(), Some("fred"));
    session.close().await.expect("Failed to close session");

    assert!(path.exists());
}

#[tokio::test]
async fn test_committed_rows_survive_reopen() {
    let dir = tempdir().unwrap();
    let target = ConnectTarget::sqlite(dir.path().join("names.db").to_string_lossy());

    let mut session = Session::open(&target, &demo_credentials()).await.unwrap();
    session.create_name_table().await;
    session.insert_name(12, "fred").await;
    session.insert_name(13, "wilma").await;
    session.close().await.unwrap();

    let mut session = Session::open(&target, &demo_credentials()).await.unwrap();
    assert_eq!(
        session.create_name_table().await,
        StatementOutcome::AlreadyExists
    );
    assert_eq!(
        session.insert_name(12, "other").await,
        StatementOutcome::AlreadyExists
    );
    assert_eq!(session.get_name(12).await.unwrap().as_deref(), Some("fred"));
    assert_eq!(session.get_name(13).await.unwrap().as_deref(), Some("wilma"));
    assert_eq!(session.get_name(14).await.unwrap(), None);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_session_from_config_file() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("configured.db");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        format!(
            "database:\n  driver: sqlite\n  name: {}\ndemo:\n  id: 42\n  name: barney\n",
            db_path.display()
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).expect("Failed to load config");
    let mut session = Session::open(&config.database.target(), &config.database.credentials())
        .await
        .unwrap();

    session.create_name_table().await;
    session
        .insert_name(config.demo.id, &config.demo.name)
        .await;
    assert_eq!(
        session.get_name(42).await.unwrap().as_deref(),
        Some("barney")
    );
    session.close().await.unwrap();
}

// =============================================================================
// Connection Failures
// =============================================================================

#[tokio::test]
async fn test_connect_to_closed_port_fails() {
    let target = ConnectTarget::postgres("testDB")
        .with_port(closed_port())
        .with_connect_timeout(Duration::from_secs(5));

    let err = Session::open(&target, &demo_credentials())
        .await
        .expect_err("connect to a closed port must fail");

    assert!(err.is_connection());
    assert!(matches!(
        err,
        SessionError::Connection { .. } | SessionError::ConnectTimeout { .. }
    ));
    assert!(!err.to_string().contains("bird"));
}

#[tokio::test]
async fn test_config_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = AppConfig::load(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(hellodb::ConfigError::IoError(_))));
}

/// Runs against a live Postgres-wire server on the loopback host.
///
/// Set `HELLODB_TEST_PORT` to the server port. The server must know the
/// `dba`/`bird` user, the `testDB` database and the `testSchema` schema, and
/// accept the `string` column type.
#[tokio::test]
#[ignore = "requires a running database server"]
async fn test_live_server_demo_scenario() {
    let port: u16 = std::env::var("HELLODB_TEST_PORT")
        .expect("HELLODB_TEST_PORT not set")
        .parse()
        .expect("HELLODB_TEST_PORT is not a port");
    let target = ConnectTarget::postgres("testDB").with_port(port);

    let mut session = Session::open(&target, &demo_credentials()).await.unwrap();
    session.create_name_table().await;
    session.insert_name(12, "fred").await;
    assert_eq!(session.get_name(12).await.unwrap().as_deref(), Some("fred"));
    session.close().await.unwrap();

    let bad = Credentials::new("dba", "not-the-password");
    let err = Session::open(&target, &bad).await.unwrap_err();
    assert!(matches!(err, SessionError::Connection { .. }));
}
