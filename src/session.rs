//! Session Layer
//!
//! A thin wrapper around one database connection:
//! - **Connect**: open a connection to a loopback server (or SQLite) with a fixed schema
//! - **Create / Insert**: swallow-and-log statements that report a [`StatementOutcome`]
//! - **Get**: parameter-bound lookup by id
//! - **Close**: release the connection, consuming the session
//!
//! # Components
//!
//! - [`Session`]: the connection wrapper and its operations
//! - [`ConnectTarget`] / [`Credentials`]: where and as whom to connect
//! - [`StatementOutcome`]: which branch a swallowed statement took
//! - [`SessionError`]: connection-level and lookup failures

mod client;
mod error;
mod outcome;
pub mod statements;
mod target;

pub use client::Session;
pub use error::SessionError;
pub use outcome::StatementOutcome;
pub use target::{
    ConnectTarget, Credentials, DEFAULT_CONNECT_TIMEOUT, DEFAULT_SCHEMA, DatabaseDriver,
    LOOPBACK_HOST, SQLITE_MEMORY,
};
