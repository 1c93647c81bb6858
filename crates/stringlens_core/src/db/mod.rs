//! Record store connection handling.
//!
//! # Responsibility
//! - Hand out SQLite connections whose `strings` table is ready to use.
//! - Report open, migration and close failures as one [`DbError`] type.
//!
//! # Invariants
//! - The store schema version lives in `PRAGMA user_version`.
//! - A store written by a newer build is refused, never downgraded.
//! - Callers own their connection; nothing here is process-global.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{close_db, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening, migrating or closing the record store.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a statement or pragma.
    Sqlite(rusqlite::Error),
    /// The store was written by a build with more migrations than this one.
    SchemaTooNew { found: u32, supported: u32 },
    /// SQLite refused to release the connection.
    Close(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "record store error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "record store schema v{found} is ahead of this build (max v{supported})"
            ),
            Self::Close(err) => write!(f, "record store did not close cleanly: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Close(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn schema_too_new_names_both_versions() {
        let err = DbError::SchemaTooNew {
            found: 7,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "record store schema v7 is ahead of this build (max v1)"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn close_failure_keeps_sqlite_cause() {
        let err = DbError::Close(rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("record store did not close cleanly"));
        assert!(err.source().is_some());
    }
}
