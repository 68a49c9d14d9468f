//! hellodb - Minimal Database Client
//!
//! This crate opens one connection to a relational database, creates a
//! two-column `names` table, inserts a row and reads it back. It can be used
//! as a library, or run as a standalone binary with the `hellodb` executable.
//!
//! # Architecture
//!
//! - **Session**: one owned sqlx connection with connect / create / insert / get / close
//! - **Config**: YAML configuration with env expansion and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use hellodb::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::connect("dba", "bird", "testDB").await?;
//!     session.create_name_table().await;
//!     session.insert_name(12, "fred").await;
//!     println!("{:?}", session.get_name(12).await?);
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod session;

pub use config::{AppConfig, ConfigError, DatabaseConfig, DemoConfig};
pub use session::{
    ConnectTarget, Credentials, DatabaseDriver, Session, SessionError, StatementOutcome,
};
