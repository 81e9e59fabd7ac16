//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file, private in-memory, or shared in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Connections returned by `open_db*` have migrations fully applied.
//! - Pool-internal opens skip migrations; the pool migrates once at startup.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", true, || Connection::open(path))
}

/// Opens a private in-memory SQLite database and applies all pending migrations.
///
/// The database disappears with the returned connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", true, Connection::open_in_memory)
}

/// Opens one more connection to a database file the pool already migrated.
pub(crate) fn open_pooled_file(path: &Path) -> DbResult<Connection> {
    open_with("file", false, || Connection::open(path))
}

/// Opens a connection to a named shared-cache in-memory database.
///
/// Every connection opened with the same `name` sees the same data for as long
/// as at least one of them stays open.
pub(crate) fn open_shared_memory(name: &str, migrate: bool) -> DbResult<Connection> {
    let uri = format!("file:{name}?mode=memory&cache=shared");
    open_with("shared_memory", migrate, || Connection::open(uri.as_str()))
}

fn open_with<F>(mode: &str, migrate: bool, opener: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match opener() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, migrate) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} migrated={migrate} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, migrate: bool) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if migrate {
        apply_migrations(conn)?;
    }
    Ok(())
}
