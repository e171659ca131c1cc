//! SQLite connection lifecycle

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use rusqlite::Connection;
use crate::{Result, Error};
use super::schema;

/// The single process-wide SQLite handle.
///
/// Shared by every [`Store`](super::Store) through an `Arc`. Locking only
/// serializes access to the handle; write ordering is left to SQLite.
pub struct Database {
    conn: Mutex<Option<Connection>>,
}

impl Database {
    /// Open a database file (creates it and its directory if missing)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::info!("Connected to SQLite database at {}", path.display());
        Ok(Self::with_connection(conn))
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::with_connection(conn))
    }

    fn with_connection(conn: Connection) -> Self {
        schema::initialize_schema(&conn);
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the open connection.
    pub fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or(Error::ConnectionClosed)?;
        f(conn).map_err(Into::into)
    }

    /// Whether the handle is still open
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Release the handle. Waits for any running statement to finish first.
    /// Calling this twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let Some(conn) = self.lock().take() else {
            return Ok(());
        };
        conn.close().map_err(|(_, e)| Error::Storage(e))?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
