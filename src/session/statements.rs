//! SQL surface of a session.
//!
//! Statements are kept verbatim except where a dialect needs otherwise:
//! placeholder syntax, and the `name` column type on SQLite.

use crate::session::DatabaseDriver;

/// Two-column `names` table.
pub const CREATE_NAME_TABLE: &str = "create table names (id int primary key, name string)";

/// Two-column `names` table for SQLite.
///
/// SQLite gives a `string` column NUMERIC affinity, which would store
/// numeric-looking names as numbers; `text` keeps them as written.
pub const CREATE_NAME_TABLE_TEXT: &str = "create table names (id int primary key, name text)";

/// Insert with `?` placeholders (SQLite).
pub const INSERT_NAME: &str = "insert into names (id, name) values (?, ?)";

/// Lookup with a `?` placeholder (SQLite).
pub const SELECT_NAME: &str = "select name from names where id=?";

/// Insert with numbered placeholders (Postgres wire).
pub const INSERT_NAME_NUMBERED: &str = "insert into names (id, name) values ($1, $2)";

/// Lookup with a numbered placeholder (Postgres wire).
pub const SELECT_NAME_NUMBERED: &str = "select name from names where id=$1";

/// Statement set for one driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statements {
    pub create_table: &'static str,
    pub insert: &'static str,
    pub select: &'static str,
}

impl Statements {
    pub fn for_driver(driver: DatabaseDriver) -> Self {
        match driver {
            DatabaseDriver::Sqlite => Self {
                create_table: CREATE_NAME_TABLE_TEXT,
                insert: INSERT_NAME,
                select: SELECT_NAME,
            },
            DatabaseDriver::Postgres => Self {
                create_table: CREATE_NAME_TABLE,
                insert: INSERT_NAME_NUMBERED,
                select: SELECT_NAME_NUMBERED,
            },
        }
    }
}
