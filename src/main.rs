//! hellodb Binary Entry Point
//!
//! Connects, creates the `names` table, inserts the demo row, prints the
//! name looked up for its id and closes the connection.

use std::time::Duration;

use clap::Parser;
use hellodb::config::parse_duration;
use hellodb::{AppConfig, DatabaseDriver, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// hellodb - minimal database client demo
#[derive(Parser, Debug)]
#[command(name = "hellodb", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "HELLODB_CONFIG")]
    config: Option<String>,

    /// Database driver: postgres or sqlite (overrides config file)
    #[arg(long, env = "HELLODB_DRIVER")]
    driver: Option<DatabaseDriver>,

    /// Server port (overrides config file)
    #[arg(long, env = "HELLODB_PORT")]
    port: Option<u16>,

    /// Database name or SQLite path (overrides config file)
    #[arg(long, env = "HELLODB_DATABASE")]
    database: Option<String>,

    /// User name (overrides config file)
    #[arg(long, env = "HELLODB_USER")]
    user: Option<String>,

    /// Password (overrides config file)
    #[arg(long, env = "HELLODB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Connect timeout, e.g. "5s" or "1m" (overrides config file)
    #[arg(long, env = "HELLODB_CONNECT_TIMEOUT", value_parser = parse_duration)]
    connect_timeout: Option<Duration>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hellodb=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => {
            tracing::info!("Loading configuration from: {}", path);
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(driver) = cli.driver {
        config.database.driver = driver;
    }
    if let Some(port) = cli.port {
        config.database.port = Some(port);
    }
    if let Some(database) = cli.database {
        config.database.name = database;
    }
    if let Some(user) = cli.user {
        config.database.user = user;
    }
    if let Some(password) = cli.password {
        config.database.password = password;
    }
    if let Some(timeout) = cli.connect_timeout {
        config.database.connect_timeout = timeout;
    }
    config.validate()?;

    let target = config.database.target();
    let credentials = config.database.credentials();

    let mut session = Session::open(&target, &credentials).await?;
    tracing::info!(
        "Session open: driver={}, database={}, schema={}, user={}",
        session.target().driver,
        session.target().database,
        session.target().schema,
        session.user()
    );

    session.create_name_table().await;
    session
        .insert_name(config.demo.id, &config.demo.name)
        .await;

    let name = session.get_name(config.demo.id).await?;
    println!(
        "Name for ID={} is: {}",
        config.demo.id,
        name.as_deref().unwrap_or("null")
    );

    session.close().await?;
    Ok(())
}
