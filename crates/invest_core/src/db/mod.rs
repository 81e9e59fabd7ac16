//! SQLite storage bootstrap, schema migration, and connection pooling.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the invest core.
//! - Apply schema migrations in deterministic order.
//! - Hand out one scoped connection per repository operation.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - Tables carry no foreign keys; `category_id`/`asset_id` are loose references.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;
mod pool;

pub use open::{open_db, open_db_in_memory};
pub use pool::{ConnectionPool, PooledConnection};

pub type DbResult<T> = Result<T, DbError>;

/// Where the application database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// SQLite database file; created on first open.
    File(PathBuf),
    /// Process-private in-memory database that lives as long as its pool.
    Memory,
}

impl DbLocation {
    /// Parses a configured location. `:memory:` selects an in-memory store.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed == ":memory:" {
            Self::Memory
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Short label used in logging events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

impl Display for DbLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => write!(f, ":memory:"),
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
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
    use super::DbLocation;
    use std::path::PathBuf;

    #[test]
    fn parse_recognizes_memory_marker() {
        assert_eq!(DbLocation::parse(" :memory: "), DbLocation::Memory);
        assert_eq!(
            DbLocation::parse("data/invest.sqlite3"),
            DbLocation::File(PathBuf::from("data/invest.sqlite3"))
        );
    }
}
