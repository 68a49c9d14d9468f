//! Result of a swallow-and-log statement.

use sqlx::error::ErrorKind;

/// Postgres SQLSTATE for `duplicate_table`.
const PG_DUPLICATE_TABLE: &str = "42P07";

/// What happened to a statement whose failure is not propagated.
///
/// Callers never receive an error from table creation or inserts; the
/// outcome records which branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    /// The statement ran and was committed.
    Applied,
    /// The table or row was already there; nothing changed.
    AlreadyExists,
    /// The statement failed for another reason, carried as the driver message.
    Skipped(String),
}

impl StatementOutcome {
    /// Classify a statement failure.
    pub fn from_error(err: &sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = err {
            let duplicate_table = db.code().as_deref() == Some(PG_DUPLICATE_TABLE)
                || db.message().contains("already exists");
            let duplicate_row = matches!(db.kind(), ErrorKind::UniqueViolation)
                || db.message().contains("UNIQUE constraint failed");

            if duplicate_table || duplicate_row {
                return Self::AlreadyExists;
            }
            return Self::Skipped(db.message().to_string());
        }
        Self::Skipped(err.to_string())
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl std::fmt::Display for StatementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::AlreadyExists => write!(f, "already exists"),
            Self::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}
