//! Scoped connection pool over one SQLite database.
//!
//! # Responsibility
//! - Migrate the database once, when the pool is opened.
//! - Lend one connection per repository operation and take it back on drop.
//!
//! # Invariants
//! - A `PooledConnection` always returns to the pool (or is closed) when it
//!   goes out of scope, on success, error, or early return alike.
//! - At most `max_idle` connections are kept open while idle.
//! - In-memory pools keep an anchor connection open for the pool lifetime so
//!   the data survives between operations.

use super::open::{open_db, open_pooled_file, open_shared_memory};
use super::{DbLocation, DbResult};
use log::{info, warn};
use rusqlite::Connection;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug)]
enum Source {
    File(PathBuf),
    SharedMemory(String),
}

/// Pool of SQLite connections to one database.
#[derive(Debug)]
pub struct ConnectionPool {
    location: DbLocation,
    source: Source,
    max_idle: usize,
    idle: Mutex<Vec<Connection>>,
    anchor: Mutex<Option<Connection>>,
}

impl ConnectionPool {
    /// Opens the database, applies migrations, and primes the pool.
    ///
    /// `max_idle` is clamped to at least one connection.
    ///
    /// # Errors
    /// - Returns `DbError` when the store cannot be opened or migrated. There is
    ///   no fallback: callers must treat this as fatal.
    pub fn open(location: DbLocation, max_idle: usize) -> DbResult<Self> {
        let max_idle = max_idle.max(1);
        let (source, first, anchor) = match &location {
            DbLocation::File(path) => {
                let conn = open_db(path)?;
                (Source::File(path.clone()), Some(conn), None)
            }
            DbLocation::Memory => {
                let name = format!("invest-mem-{}", Uuid::new_v4().simple());
                let anchor = open_shared_memory(&name, true)?;
                (Source::SharedMemory(name), None, Some(anchor))
            }
        };

        info!(
            "event=db_pool_open module=db status=ok mode={} max_idle={max_idle}",
            location.mode()
        );

        Ok(Self {
            location,
            source,
            max_idle,
            idle: Mutex::new(first.into_iter().collect()),
            anchor: Mutex::new(anchor),
        })
    }

    /// Convenience constructor for a fresh in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open(DbLocation::Memory, 1)
    }

    /// Borrows a connection for the duration of one operation.
    ///
    /// Reuses an idle connection when one is available and opens a new one
    /// otherwise.
    pub fn acquire(&self) -> DbResult<PooledConnection<'_>> {
        let reused = self.lock_idle().pop();
        let conn = match reused {
            Some(conn) => conn,
            None => self.open_connection()?,
        };
        Ok(PooledConnection {
            conn: Some(conn),
            pool: self,
        })
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Number of connections currently parked in the pool.
    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    fn open_connection(&self) -> DbResult<Connection> {
        match &self.source {
            Source::File(path) => open_pooled_file(path),
            Source::SharedMemory(name) => open_shared_memory(name, false),
        }
    }

    fn release(&self, conn: Connection) {
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(conn);
            return;
        }
        drop(idle);
        close_connection(conn);
    }

    fn lock_idle(&self) -> MutexGuard<'_, Vec<Connection>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ConnectionPool {
    fn drop(&mut self) {
        let idle = std::mem::take(
            self.idle
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for conn in idle {
            close_connection(conn);
        }

        let anchor = self
            .anchor
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(conn) = anchor {
            close_connection(conn);
        }
    }
}

/// Connection lent by a `ConnectionPool`; returned to the pool on drop.
pub struct PooledConnection<'pool> {
    conn: Option<Connection>,
    pool: &'pool ConnectionPool,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
            .as_ref()
            .expect("pooled connection is present until drop")
    }
}

impl DerefMut for PooledConnection<'_> {
    fn deref_mut(&mut self) -> &mut Connection {
        self.conn
            .as_mut()
            .expect("pooled connection is present until drop")
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.release(conn);
        }
    }
}

// Close failures are logged and otherwise ignored.
fn close_connection(conn: Connection) {
    if let Err((_conn, err)) = conn.close() {
        warn!("event=db_close module=db status=error error={err}");
    }
}
